//! In-memory implementation of every repository trait
//!
//! Backs the server when no PostgreSQL is configured and the workflow tests.
//! All tables sit behind one lock, so each method is atomic the same way a
//! transaction is on the PostgreSQL side. Unique constraints and cascading
//! deletes mirror the SQL schema.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use booking_core::entities::{
    comments_to_evict, Attachment, Comment, Queue, Record, RefreshToken, User,
};
use booking_core::error::DomainError;
use booking_core::traits::{
    AttachmentRepository, CommentRepository, QueueRepository, RecordRepository,
    RefreshTokenRepository, RepoResult, UserRepository,
};
use booking_core::value_objects::{
    AttachmentId, CommentId, QueueId, RecordId, RefreshTokenId, TimeWindow, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    password_hashes: HashMap<UserId, String>,
    refresh_tokens: HashMap<RefreshTokenId, RefreshToken>,
    queues: HashMap<QueueId, Queue>,
    records: HashMap<RecordId, Record>,
    comments: HashMap<CommentId, Comment>,
    attachments: HashMap<AttachmentId, Attachment>,
}

impl Tables {
    fn check_user_unique(&self, user: &User) -> RepoResult<()> {
        for other in self.users.values().filter(|u| u.id != user.id) {
            if other.login == user.login {
                return Err(DomainError::DuplicateLogin);
            }
            if other.email == user.email {
                return Err(DomainError::DuplicateEmail);
            }
            if user.telegram_login.is_some() && other.telegram_login == user.telegram_login {
                return Err(DomainError::DuplicateTelegramLogin);
            }
        }
        Ok(())
    }

    fn check_queue_unique(&self, queue: &Queue) -> RepoResult<()> {
        if self
            .queues
            .values()
            .any(|q| q.id != queue.id && q.name == queue.name)
        {
            return Err(DomainError::DuplicateQueueName);
        }
        Ok(())
    }

    fn delete_records_where(&mut self, predicate: impl Fn(&Record) -> bool) {
        let doomed: Vec<RecordId> = self
            .records
            .values()
            .filter(|r| predicate(r))
            .map(|r| r.id)
            .collect();
        self.attachments.retain(|_, a| !doomed.contains(&a.record_id));
        for id in doomed {
            self.records.remove(&id);
        }
    }

    fn queues_owned_by(&self, user_id: UserId) -> Vec<QueueId> {
        self.queues
            .values()
            .filter(|q| q.owner_id == user_id)
            .map(|q| q.id)
            .collect()
    }

    fn attachments_where(&self, predicate: impl Fn(&Record) -> bool) -> Vec<Attachment> {
        let mut attachments: Vec<Attachment> = self
            .attachments
            .values()
            .filter(|a| self.records.get(&a.record_id).is_some_and(&predicate))
            .cloned()
            .collect();
        attachments.sort_by_key(|a| (a.created_at, a.id));
        attachments
    }

    fn apply_comment(&mut self, record_id: RecordId, text: &str) -> RepoResult<()> {
        let record = self
            .records
            .get_mut(&record_id)
            .ok_or(DomainError::RecordNotFound(record_id))?;
        record.set_manager_comment(Some(text.to_string()));
        Ok(())
    }
}

/// Process-local store implementing all repository traits
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_records(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(|r| (r.meeting_datetime, r.id));
    records
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.login == login)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.tables.read().users.values().cloned().collect();
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users)
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.tables.write();
        tables.check_user_unique(user)?;
        tables.users.insert(user.id, user.clone());
        tables
            .password_hashes
            .insert(user.id, password_hash.to_string());
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&user.id) {
            return Err(DomainError::UserNotFound(user.id));
        }
        tables.check_user_unique(user)?;
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&id) {
            return Err(DomainError::UserNotFound(id));
        }

        let owned_queues = tables.queues_owned_by(id);
        tables.refresh_tokens.retain(|_, t| t.user_id != id);
        tables.delete_records_where(|r| r.user_id == id || owned_queues.contains(&r.queue_id));
        tables
            .comments
            .retain(|_, c| !owned_queues.contains(&c.queue_id));
        tables.queues.retain(|_, q| q.owner_id != id);
        tables.password_hashes.remove(&id);
        tables.users.remove(&id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.tables.read().password_hashes.get(&id).cloned())
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let hash = tables
            .password_hashes
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        *hash = password_hash.to_string();
        Ok(())
    }
}

// ============================================================================
// Refresh tokens
// ============================================================================

#[async_trait]
impl RefreshTokenRepository for MemoryStore {
    #[instrument(skip(self, token), fields(token_id = %token.id))]
    async fn create(&self, token: &RefreshToken) -> RepoResult<()> {
        self.tables
            .write()
            .refresh_tokens
            .insert(token.id, token.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_active(&self, now: DateTime<Utc>) -> RepoResult<Vec<RefreshToken>> {
        let mut tokens: Vec<RefreshToken> = self
            .tables
            .read()
            .refresh_tokens
            .values()
            .filter(|t| t.is_valid_at(now))
            .cloned()
            .collect();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tokens)
    }

    #[instrument(skip(self))]
    async fn revoke(&self, id: RefreshTokenId) -> RepoResult<bool> {
        let mut tables = self.tables.write();
        match tables.refresh_tokens.get_mut(&id) {
            Some(token) if !token.revoked => {
                token.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        let mut tables = self.tables.write();
        let mut revoked = 0;
        for token in tables
            .refresh_tokens
            .values_mut()
            .filter(|t| t.user_id == user_id && !t.revoked)
        {
            token.revoked = true;
            revoked += 1;
        }
        Ok(revoked)
    }
}

// ============================================================================
// Queues
// ============================================================================

#[async_trait]
impl QueueRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: QueueId) -> RepoResult<Option<Queue>> {
        Ok(self.tables.read().queues.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Queue>> {
        let mut queues: Vec<Queue> = self.tables.read().queues.values().cloned().collect();
        queues.sort_by_key(|q| (q.created_at, q.id));
        Ok(queues)
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Queue>> {
        let mut queues: Vec<Queue> = self
            .tables
            .read()
            .queues
            .values()
            .filter(|q| q.owner_id == owner_id)
            .cloned()
            .collect();
        queues.sort_by_key(|q| (q.created_at, q.id));
        Ok(queues)
    }

    #[instrument(skip(self, queue), fields(queue_id = %queue.id))]
    async fn create(&self, queue: &Queue) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&queue.owner_id) {
            return Err(DomainError::UserNotFound(queue.owner_id));
        }
        tables.check_queue_unique(queue)?;
        tables.queues.insert(queue.id, queue.clone());
        Ok(())
    }

    #[instrument(skip(self, queue), fields(queue_id = %queue.id))]
    async fn update(&self, queue: &Queue) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.queues.contains_key(&queue.id) {
            return Err(DomainError::QueueNotFound(queue.id));
        }
        tables.check_queue_unique(queue)?;
        tables.queues.insert(queue.id, queue.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: QueueId) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if tables.queues.remove(&id).is_none() {
            return Err(DomainError::QueueNotFound(id));
        }
        tables.delete_records_where(|r| r.queue_id == id);
        tables.comments.retain(|_, c| c.queue_id != id);
        Ok(())
    }
}

// ============================================================================
// Records
// ============================================================================

#[async_trait]
impl RecordRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Record>> {
        Ok(self.tables.read().records.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Record>> {
        let records = self
            .tables
            .read()
            .records
            .values()
            .filter(|r| r.queue_id == queue_id)
            .cloned()
            .collect();
        Ok(sorted_records(records))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Record>> {
        let records = self
            .tables
            .read()
            .records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_records(records))
    }

    #[instrument(skip(self))]
    async fn has_collision(
        &self,
        queue_id: QueueId,
        window: TimeWindow,
        exclude: Option<RecordId>,
    ) -> RepoResult<bool> {
        Ok(self.tables.read().records.values().any(|r| {
            r.queue_id == queue_id
                && Some(r.id) != exclude
                && window.contains(r.meeting_datetime)
        }))
    }

    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn create(&self, record: &Record) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.queues.contains_key(&record.queue_id) {
            return Err(DomainError::QueueNotFound(record.queue_id));
        }
        if !tables.users.contains_key(&record.user_id) {
            return Err(DomainError::UserNotFound(record.user_id));
        }
        tables.records.insert(record.id, record.clone());
        Ok(())
    }

    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn update(&self, record: &Record) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let stored = tables
            .records
            .get_mut(&record.id)
            .ok_or(DomainError::RecordNotFound(record.id))?;
        *stored = record.clone();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.records.contains_key(&id) {
            return Err(DomainError::RecordNotFound(id));
        }
        tables.delete_records_where(|r| r.id == id);
        Ok(())
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl CommentRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.tables.read().comments.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .tables
            .read()
            .comments
            .values()
            .filter(|c| c.belongs_to(queue_id))
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, queue_id = %comment.queue_id))]
    async fn create_and_apply(
        &self,
        comment: &Comment,
        keep: usize,
    ) -> RepoResult<Vec<CommentId>> {
        let mut tables = self.tables.write();
        if !tables.queues.contains_key(&comment.queue_id) {
            return Err(DomainError::QueueNotFound(comment.queue_id));
        }
        // Checked up front so a failure leaves nothing half-applied
        if !tables.records.contains_key(&comment.record_id) {
            return Err(DomainError::RecordNotFound(comment.record_id));
        }

        tables.comments.insert(comment.id, comment.clone());

        let queue_comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.belongs_to(comment.queue_id))
            .cloned()
            .collect();
        let evicted = comments_to_evict(&queue_comments, keep);
        for id in &evicted {
            tables.comments.remove(id);
        }

        tables.apply_comment(comment.record_id, &comment.text)?;
        Ok(evicted)
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn touch_and_apply(&self, comment: &Comment, record_id: RecordId) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.records.contains_key(&record_id) {
            return Err(DomainError::RecordNotFound(record_id));
        }
        let stored = tables
            .comments
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.text.clone_from(&comment.text);
        stored.last_used_at = comment.last_used_at;

        tables.apply_comment(record_id, &comment.text)
    }
}

// ============================================================================
// Attachments
// ============================================================================

#[async_trait]
impl AttachmentRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AttachmentId) -> RepoResult<Option<Attachment>> {
        Ok(self.tables.read().attachments.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_record(&self, record_id: RecordId) -> RepoResult<Vec<Attachment>> {
        Ok(self
            .tables
            .read()
            .attachments_where(|r| r.id == record_id))
    }

    #[instrument(skip(self))]
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Attachment>> {
        Ok(self
            .tables
            .read()
            .attachments_where(|r| r.queue_id == queue_id))
    }

    #[instrument(skip(self))]
    async fn find_owned_by_user(&self, user_id: UserId) -> RepoResult<Vec<Attachment>> {
        let tables = self.tables.read();
        let owned_queues = tables.queues_owned_by(user_id);
        Ok(tables.attachments_where(|r| r.user_id == user_id || owned_queues.contains(&r.queue_id)))
    }

    #[instrument(skip(self, attachment), fields(attachment_id = %attachment.id))]
    async fn create(&self, attachment: &Attachment) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.records.contains_key(&attachment.record_id) {
            return Err(DomainError::RecordNotFound(attachment.record_id));
        }
        if tables
            .attachments
            .values()
            .any(|a| a.object_key == attachment.object_key)
        {
            return Err(DomainError::DatabaseError(format!(
                "duplicate object key: {}",
                attachment.object_key
            )));
        }
        tables.attachments.insert(attachment.id, attachment.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AttachmentId) -> RepoResult<()> {
        self.tables
            .write()
            .attachments
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::AttachmentNotFound(id))
    }
}
