//! Core store trait implementations, delegating to the inherent methods.
//!
//! Trait signatures use `anyhow::Result`; the `?` below converts the typed
//! `StorageError` while keeping it inspectable via downcast.

use agora_core::{
    Intervention, InterventionDraft, InterventionStore, NudgeState, NudgeStateStore, Post,
    PostDraft, PostStore, Room, RoomMember, RoomStore, User, UserRole, UserStore,
};
use anyhow::Result;
use chrono::{DateTime, Utc};

use super::Storage;

impl RoomStore for Storage {
    fn create_room(&self, code: &str, name: &str, now: DateTime<Utc>) -> Result<Room> {
        Ok(Self::create_room(self, code, name, now)?)
    }

    fn room_by_code(&self, code: &str) -> Result<Option<Room>> {
        Ok(Self::room_by_code(self, code)?)
    }

    fn room_by_id(&self, id: i64) -> Result<Option<Room>> {
        Ok(Self::room_by_id(self, id)?)
    }

    fn add_member(&self, room_id: i64, user_id: i64, now: DateTime<Utc>) -> Result<()> {
        Ok(Self::add_member(self, room_id, user_id, now)?)
    }

    fn members(&self, room_id: i64) -> Result<Vec<RoomMember>> {
        Ok(Self::members(self, room_id)?)
    }

    fn start_activity(
        &self,
        room_id: i64,
        durations_secs: &[u32],
        now: DateTime<Utc>,
    ) -> Result<Room> {
        Ok(Self::start_activity(self, room_id, durations_secs, now)?)
    }

    fn activity_run_id(&self, room_id: i64) -> Result<String> {
        Ok(Self::activity_run_id(self, room_id)?)
    }
}

impl PostStore for Storage {
    fn append_post(&self, draft: &PostDraft) -> Result<Post> {
        Ok(Self::append_post(self, draft)?)
    }

    fn posts_in_room(&self, room_id: i64) -> Result<Vec<Post>> {
        Ok(Self::posts_in_room(self, room_id)?)
    }

    fn count_posts_in_phase(&self, room_id: i64, phase_index: Option<u32>) -> Result<i64> {
        Ok(Self::count_posts_in_phase(self, room_id, phase_index)?)
    }

    fn count_posts_by_author(
        &self,
        room_id: i64,
        phase_index: Option<u32>,
        author_id: i64,
    ) -> Result<i64> {
        Ok(Self::count_posts_by_author(self, room_id, phase_index, author_id)?)
    }

    fn author_posted_since(
        &self,
        room_id: i64,
        phase_index: Option<u32>,
        author_id: i64,
        since: DateTime<Utc>,
    ) -> Result<bool> {
        Ok(Self::author_posted_since(self, room_id, phase_index, author_id, since)?)
    }
}

impl InterventionStore for Storage {
    fn append_intervention(&self, draft: &InterventionDraft) -> Result<Intervention> {
        Ok(Self::append_intervention(self, draft)?)
    }

    fn intervention_since(
        &self,
        room_id: i64,
        rule_name: &str,
        phase_index: Option<u32>,
        since: DateTime<Utc>,
    ) -> Result<bool> {
        Ok(Self::intervention_since(self, room_id, rule_name, phase_index, since)?)
    }

    fn interventions_in_room(&self, room_id: i64) -> Result<Vec<Intervention>> {
        Ok(Self::interventions_in_room(self, room_id)?)
    }
}

impl NudgeStateStore for Storage {
    fn nudge_state(
        &self,
        room_id: i64,
        user_id: i64,
        phase_index: Option<u32>,
    ) -> Result<Option<NudgeState>> {
        Ok(Self::nudge_state(self, room_id, user_id, phase_index)?)
    }

    fn save_nudge_state(&self, state: &NudgeState) -> Result<()> {
        Ok(Self::save_nudge_state(self, state)?)
    }
}

impl UserStore for Storage {
    fn create_user(
        &self,
        username: &str,
        display_name: &str,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<User> {
        Ok(Self::create_user(self, username, display_name, role, now)?)
    }

    fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(Self::user_by_id(self, id)?)
    }
}
