//! Sled-backed persistence for holding records.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TenureError;
use crate::record::{AccountId, HoldingRecord};

const RECORD_PREFIX: &str = "record:";

pub struct Storage {
    db: sled::Db,
}

impl Storage {
    pub fn open(path: &str) -> Result<Self, TenureError> {
        let db = sled::open(path).map_err(|e| TenureError::DatabaseError(e.to_string()))?;
        Ok(Storage { db })
    }

    // Generic Helper: Put
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), TenureError> {
        let serialized =
            bincode::serialize(value).map_err(|e| TenureError::SerializationError(e.to_string()))?;
        self.db
            .insert(key.as_bytes(), serialized)
            .map_err(|e| TenureError::DatabaseError(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| TenureError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    // Generic Helper: Get
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, TenureError> {
        match self.db.get(key.as_bytes()) {
            Ok(Some(data)) => {
                let deserialized = bincode::deserialize(&data)
                    .map_err(|e| TenureError::DeserializationError(e.to_string()))?;
                Ok(Some(deserialized))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(TenureError::DatabaseError(e.to_string())),
        }
    }

    // --- Record Accessors ---

    pub fn save_record(&self, account: &str, record: &HoldingRecord) -> Result<(), TenureError> {
        self.put(&format!("{}{}", RECORD_PREFIX, account), record)
    }

    pub fn get_record(&self, account: &str) -> Result<Option<HoldingRecord>, TenureError> {
        self.get(&format!("{}{}", RECORD_PREFIX, account))
    }

    /// All persisted records, for rebuilding the in-memory map at startup.
    pub fn load_records(&self) -> Result<Vec<(AccountId, HoldingRecord)>, TenureError> {
        let mut records = Vec::new();
        for entry in self.db.scan_prefix(RECORD_PREFIX.as_bytes()) {
            let (key, value) = entry.map_err(|e| TenureError::DatabaseError(e.to_string()))?;
            let account = String::from_utf8(key[RECORD_PREFIX.len()..].to_vec())
                .map_err(|e| TenureError::DeserializationError(e.to_string()))?;
            let record: HoldingRecord = bincode::deserialize(&value)
                .map_err(|e| TenureError::DeserializationError(e.to_string()))?;
            records.push((account, record));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BalancePoint;
    use crate::weight::U256;

    #[test]
    fn test_record_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().to_str().unwrap()).unwrap();

        assert!(storage.get_record("alice").unwrap().is_none());

        let record = HoldingRecord::new(BalancePoint::new(500, 42), U256::from(7u64));
        storage.save_record("alice", &record).unwrap();
        storage
            .save_record("bob", &HoldingRecord::default())
            .unwrap();

        assert_eq!(storage.get_record("alice").unwrap(), Some(record));

        let mut all = storage.load_records().unwrap();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], ("alice".to_string(), record));
        assert_eq!(all[1], ("bob".to_string(), HoldingRecord::default()));
    }
}
