//! Business-number index over the record store
//!
//! A write stores the record under the transaction id that created it, then
//! points `businessNo` at that id. A business-number read follows the pointer
//! and reads the record it names.

use crate::record::Record;
use crate::record_store::RecordStore;
use crate::{observe, KeyLayout, Result, StateTxn, TxId};

/// Outcome of a lookup
///
/// A miss is an ordinary outcome, not an error. The backend cannot tell
/// "never written" from "written as empty", so empty bytes count as a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Vec<u8>),
    NotFound,
}

impl Lookup {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            Lookup::NotFound
        } else {
            Lookup::Found(bytes)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_payload(self) -> Option<Vec<u8>> {
        match self {
            Lookup::Found(payload) => Some(payload),
            Lookup::NotFound => None,
        }
    }
}

/// Write path and business-number read path
pub struct IndexResolver<'t> {
    store: RecordStore<'t>,
    layout: KeyLayout,
}

impl<'t> IndexResolver<'t> {
    pub fn new(txn: &'t mut dyn StateTxn, layout: KeyLayout) -> Self {
        Self {
            store: RecordStore::new(txn),
            layout,
        }
    }

    /// Identifier of the enclosing transaction
    pub fn current_tx_id(&self) -> &str {
        self.store.tx_id()
    }

    /// Read access to the underlying record store
    pub fn store(&self) -> &RecordStore<'t> {
        &self.store
    }

    /// Persist a record under `current_tx_id` and index it by its business number
    ///
    /// Validation happens before any write: a malformed payload, a missing
    /// `businessNo` or a key the backend would refuse leaves the store
    /// untouched.
    ///
    /// The record write and the index write are two separate backend calls.
    /// If the record write fails the index write never runs. If the index
    /// write fails after the record write succeeded, the record stays
    /// reachable by primary key only; nothing is rolled back here. Whether
    /// either write survives is decided by the enclosing transaction's commit.
    ///
    /// Re-using a business number re-points the index at the newest record;
    /// the previous record is left in place, reachable by its primary key.
    pub fn write_record(&mut self, raw_payload: &[u8], current_tx_id: &str) -> Result<TxId> {
        let record = Record::parse(raw_payload)?;
        let business_no = record.business_no()?;
        let record_key = self.layout.record_key(current_tx_id);
        let index_key = self.layout.index_key(business_no);
        self.store.check_key(&record_key)?;
        self.store.check_key(&index_key)?;

        self.store.put(&record_key, raw_payload)?;
        self.store.put(&index_key, current_tx_id.as_bytes())?;

        observe::record_write();
        tracing::info!(
            "Saved record with tx id {} and businessNo {}",
            current_tx_id,
            business_no
        );
        tracing::debug!("Record carries {} other fields", record.fields().len());
        Ok(current_tx_id.to_string())
    }

    /// Read a record by the transaction id that created it
    pub fn read_by_primary_key(&self, key: &str) -> Result<Lookup> {
        tracing::debug!("Query record by tx id {}", key);
        let lookup = Lookup::from_bytes(self.store.get(&self.layout.record_key(key))?);
        observe::record_lookup("primary", lookup.is_found());
        Ok(lookup)
    }

    /// Read the newest record indexed under `business_no`
    ///
    /// Performs at most two lookups: the pointer, then the record. An empty
    /// pointer short-circuits to a miss.
    pub fn read_by_business_id(&self, business_no: &str) -> Result<Lookup> {
        let pointer = self.store.get(&self.layout.index_key(business_no))?;
        let primary_key = String::from_utf8_lossy(&pointer);
        tracing::debug!(
            "Query record by businessNo {}, tx id is {:?}",
            business_no,
            primary_key
        );

        if primary_key.is_empty() {
            observe::record_lookup("business", false);
            return Ok(Lookup::NotFound);
        }

        let lookup = self.read_by_primary_key(&primary_key)?;
        observe::record_lookup("business", lookup.is_found());
        Ok(lookup)
    }
}
