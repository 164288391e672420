//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use idoit_core::{Challenge, ChallengeId, Comment, Donation, DonationId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Collect all index keys under a challenge prefix, in forward
    /// (time-ascending) order.
    fn scan_challenge_index(&self, cf_name: &str, challenge_id: &ChallengeId) -> Result<Vec<Vec<u8>>> {
        let cf = self.cf(cf_name)?;
        let prefix = keys::challenge_prefix(challenge_id);

        let iter = self.db.iterator_cf(
            &cf,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        let mut matched = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            matched.push(key.to_vec());
        }

        Ok(matched)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Challenge Operations
    // =========================================================================

    fn put_challenge(&self, challenge: &Challenge) -> Result<()> {
        let cf_challenges = self.cf(cf::CHALLENGES)?;
        let cf_by_time = self.cf(cf::CHALLENGES_BY_TIME)?;

        let key = keys::challenge_key(&challenge.id);
        let time_key = keys::challenge_time_key(challenge.created_at, &challenge.id);
        let value = Self::serialize(challenge)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_challenges, &key, &value);
        batch.put_cf(&cf_by_time, &time_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_challenge(&self, challenge_id: &ChallengeId) -> Result<Option<Challenge>> {
        let cf = self.cf(cf::CHALLENGES)?;
        let key = keys::challenge_key(challenge_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_challenges(&self) -> Result<Vec<Challenge>> {
        let cf_by_time = self.cf(cf::CHALLENGES_BY_TIME)?;

        // Reverse scan of the time index yields newest first.
        let iter = self.db.iterator_cf(&cf_by_time, IteratorMode::End);

        let mut challenges = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            let challenge_id = keys::extract_challenge_id_from_time_key(&key);
            if let Some(challenge) = self.get_challenge(&challenge_id)? {
                challenges.push(challenge);
            }
        }

        Ok(challenges)
    }

    fn bump_likes(&self, challenge_id: &ChallengeId) -> Result<i64> {
        let cf = self.cf(cf::CHALLENGES)?;
        let key = keys::challenge_key(challenge_id);

        let mut challenge = self
            .get_challenge(challenge_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "challenge",
                id: challenge_id.to_string(),
            })?;

        challenge.likes += 1;
        challenge.updated_at = chrono::Utc::now();

        let value = Self::serialize(&challenge)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(challenge.likes)
    }

    fn apply_progress(
        &self,
        challenge_id: &ChallengeId,
        raised_amount: i64,
        progress_percent: i64,
    ) -> Result<()> {
        let cf = self.cf(cf::CHALLENGES)?;
        let key = keys::challenge_key(challenge_id);

        let mut challenge = self
            .get_challenge(challenge_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "challenge",
                id: challenge_id.to_string(),
            })?;

        // Idempotent: re-applying the current pair is a no-op.
        if challenge.raised_amount == raised_amount
            && challenge.progress_percent == progress_percent
        {
            return Ok(());
        }

        challenge.raised_amount = raised_amount;
        challenge.progress_percent = progress_percent;
        challenge.updated_at = chrono::Utc::now();

        let value = Self::serialize(&challenge)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(
            challenge_id = %challenge_id,
            raised_amount = %raised_amount,
            progress_percent = %progress_percent,
            "Progress applied"
        );

        Ok(())
    }

    // =========================================================================
    // Donation Ledger Operations
    // =========================================================================

    fn append_donation(&self, donation: &Donation) -> Result<()> {
        if donation.amount <= 0 {
            return Err(StoreError::InvalidAmount {
                amount: donation.amount,
            });
        }

        let cf_donations = self.cf(cf::DONATIONS)?;
        let cf_by_challenge = self.cf(cf::DONATIONS_BY_CHALLENGE)?;

        let donation_key = keys::donation_key(&donation.id);
        let index_key = keys::challenge_donation_key(&donation.challenge_id, &donation.id);
        let value = Self::serialize(donation)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_donations, &donation_key, &value);
        batch.put_cf(&cf_by_challenge, &index_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_donation(&self, donation_id: &DonationId) -> Result<Option<Donation>> {
        let cf = self.cf(cf::DONATIONS)?;
        let key = keys::donation_key(donation_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_donations_by_challenge(&self, challenge_id: &ChallengeId) -> Result<Vec<Donation>> {
        let index_keys = self.scan_challenge_index(cf::DONATIONS_BY_CHALLENGE, challenge_id)?;

        let mut donations = Vec::with_capacity(index_keys.len());
        for key in index_keys {
            let donation_id = keys::extract_donation_id_from_challenge_key(&key);
            if let Some(donation) = self.get_donation(&donation_id)? {
                donations.push(donation);
            }
        }

        Ok(donations)
    }

    // =========================================================================
    // Comment Operations
    // =========================================================================

    fn put_comment(&self, comment: &Comment) -> Result<()> {
        let cf_comments = self.cf(cf::COMMENTS)?;
        let cf_by_challenge = self.cf(cf::COMMENTS_BY_CHALLENGE)?;

        let comment_key = keys::comment_key(&comment.id);
        let index_key = keys::challenge_comment_key(&comment.challenge_id, &comment.id);
        let value = Self::serialize(comment)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_comments, &comment_key, &value);
        batch.put_cf(&cf_by_challenge, &index_key, []);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_comments_by_challenge(&self, challenge_id: &ChallengeId) -> Result<Vec<Comment>> {
        let cf = self.cf(cf::COMMENTS)?;
        let index_keys = self.scan_challenge_index(cf::COMMENTS_BY_CHALLENGE, challenge_id)?;

        let mut comments = Vec::with_capacity(index_keys.len());
        for key in index_keys {
            let comment_id = keys::extract_comment_id_from_challenge_key(&key);
            let data = self
                .db
                .get_cf(&cf, keys::comment_key(&comment_id))
                .map_err(|e| StoreError::Database(e.to_string()))?;

            if let Some(data) = data {
                comments.push(Self::deserialize(&data)?);
            }
        }

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn sample_challenge(goal_amount: i64) -> Challenge {
        let mut challenge =
            Challenge::new("Jae".into(), "jae@example.com".into(), "Eat 50 hotdogs".into());
        challenge.goal_amount = goal_amount;
        challenge.images = vec!["https://cdn.example.com/hotdog.jpg".into()];
        challenge
    }

    #[test]
    fn challenge_crud() {
        let (store, _dir) = create_test_store();
        let challenge = sample_challenge(100);

        store.put_challenge(&challenge).unwrap();

        let retrieved = store.get_challenge(&challenge.id).unwrap().unwrap();
        assert_eq!(retrieved.title, "Eat 50 hotdogs");
        assert_eq!(retrieved.goal_amount, 100);

        assert!(store
            .get_challenge(&ChallengeId::generate())
            .unwrap()
            .is_none());
    }

    #[test]
    fn list_challenges_newest_first() {
        let (store, _dir) = create_test_store();

        let first = sample_challenge(0);
        store.put_challenge(&first).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2)); // Ensure distinct timestamps

        let second = sample_challenge(0);
        store.put_challenge(&second).unwrap();

        let challenges = store.list_challenges().unwrap();
        assert_eq!(challenges.len(), 2);
        assert_eq!(challenges[0].id, second.id); // Newest first
        assert_eq!(challenges[1].id, first.id);
    }

    #[test]
    fn bump_likes_increments() {
        let (store, _dir) = create_test_store();
        let challenge = sample_challenge(0);
        store.put_challenge(&challenge).unwrap();

        assert_eq!(store.bump_likes(&challenge.id).unwrap(), 1);
        assert_eq!(store.bump_likes(&challenge.id).unwrap(), 2);

        let retrieved = store.get_challenge(&challenge.id).unwrap().unwrap();
        assert_eq!(retrieved.likes, 2);
    }

    #[test]
    fn bump_likes_missing_challenge() {
        let (store, _dir) = create_test_store();
        let result = store.bump_likes(&ChallengeId::generate());
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn append_donation_rejects_non_positive_amounts() {
        let (store, _dir) = create_test_store();
        let challenge = sample_challenge(100);
        store.put_challenge(&challenge).unwrap();

        let zero = Donation::new(challenge.id, 0);
        assert!(matches!(
            store.append_donation(&zero),
            Err(StoreError::InvalidAmount { amount: 0 })
        ));

        let negative = Donation::new(challenge.id, -5);
        assert!(matches!(
            store.append_donation(&negative),
            Err(StoreError::InvalidAmount { amount: -5 })
        ));

        // Nothing was written.
        assert!(store
            .list_donations_by_challenge(&challenge.id)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn ledger_lists_in_created_at_ascending_order() {
        let (store, _dir) = create_test_store();
        let challenge = sample_challenge(100);
        store.put_challenge(&challenge).unwrap();

        let first = Donation::new(challenge.id, 10);
        store.append_donation(&first).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2)); // Ensure different ULIDs

        let second = Donation::new(challenge.id, 20);
        store.append_donation(&second).unwrap();

        let ledger = store.list_donations_by_challenge(&challenge.id).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].id, first.id); // Oldest first
        assert_eq!(ledger[1].id, second.id);

        let retrieved = store.get_donation(&first.id).unwrap().unwrap();
        assert_eq!(retrieved.amount, 10);
    }

    #[test]
    fn ledger_is_scoped_per_challenge() {
        let (store, _dir) = create_test_store();
        let ours = sample_challenge(100);
        let theirs = sample_challenge(100);
        store.put_challenge(&ours).unwrap();
        store.put_challenge(&theirs).unwrap();

        store.append_donation(&Donation::new(ours.id, 10)).unwrap();
        store
            .append_donation(&Donation::new(theirs.id, 999))
            .unwrap();

        let ledger = store.list_donations_by_challenge(&ours.id).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].amount, 10);
    }

    #[test]
    fn empty_ledger_is_empty_vec_not_error() {
        let (store, _dir) = create_test_store();
        let ledger = store
            .list_donations_by_challenge(&ChallengeId::generate())
            .unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn apply_progress_updates_cached_fields() {
        let (store, _dir) = create_test_store();
        let challenge = sample_challenge(100);
        store.put_challenge(&challenge).unwrap();

        store.apply_progress(&challenge.id, 80, 80).unwrap();

        let updated = store.get_challenge(&challenge.id).unwrap().unwrap();
        assert_eq!(updated.raised_amount, 80);
        assert_eq!(updated.progress_percent, 80);
    }

    #[test]
    fn apply_progress_is_idempotent() {
        let (store, _dir) = create_test_store();
        let challenge = sample_challenge(100);
        store.put_challenge(&challenge).unwrap();

        store.apply_progress(&challenge.id, 80, 80).unwrap();
        let after_first = store.get_challenge(&challenge.id).unwrap().unwrap();

        store.apply_progress(&challenge.id, 80, 80).unwrap();
        let after_second = store.get_challenge(&challenge.id).unwrap().unwrap();

        assert_eq!(after_second.raised_amount, 80);
        assert_eq!(after_second.progress_percent, 80);
        // The second apply was a no-op, not a rewrite.
        assert_eq!(after_second.updated_at, after_first.updated_at);
    }

    #[test]
    fn apply_progress_missing_challenge() {
        let (store, _dir) = create_test_store();
        let result = store.apply_progress(&ChallengeId::generate(), 10, 10);
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn comments_list_oldest_first() {
        let (store, _dir) = create_test_store();
        let challenge = sample_challenge(0);
        store.put_challenge(&challenge).unwrap();

        let first = Comment::new(challenge.id, "You can do it!".into());
        store.put_comment(&first).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2));

        let second = Comment::new(challenge.id, "Halfway there!".into());
        store.put_comment(&second).unwrap();

        let comments = store.list_comments_by_challenge(&challenge.id).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "You can do it!");
        assert_eq!(comments[1].content, "Halfway there!");
    }
}
