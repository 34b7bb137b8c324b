//! Integration tests for querygate.
//!
//! Shared fixtures live here; each submodule covers one component.

pub mod dataset_test;
pub mod gateway_test;
pub mod tools_test;

use querygate::dataset::ensure_store;
use querygate::db::SqliteStore;
use querygate::query::QueryGateway;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Sample of the bank customer dataset.
pub const CUSTOMERS_CSV: &str = "\
id,name,surname,gender,age,region,job_classification,date_joined,balance
1,Simon,Walsh,Male,21,England,White Collar,05.Jan.15,113810.15
2,Alice,Patel,Female,35,India,Blue Collar,10.Mar.17,25841.00
3,Lisa,Morrison,Female,42,Scotland,White Collar,12.Feb.16,9234.50
4,Ruth,Campbell,Female,55,Wales,Other,20.Jul.15,48032.70
5,Lisa,Grant,Female,29,England,Blue Collar,01.Dec.18,15000.00
";

/// Number of records in `CUSTOMERS_CSV`.
pub const CUSTOMER_COUNT: usize = 5;

/// A scratch directory holding a source CSV and the store built from it.
pub struct Fixture {
    _dir: TempDir,
    pub source: PathBuf,
    pub store: PathBuf,
}

impl Fixture {
    /// Writes the CSV fixture without building the store.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("customers.csv");
        let store = dir.path().join("bank_data.db");
        std::fs::write(&source, CUSTOMERS_CSV).unwrap();
        Self {
            _dir: dir,
            source,
            store,
        }
    }

    /// Builds the store and returns a gateway over it.
    pub async fn gateway(&self) -> QueryGateway {
        ensure_store(&self.source, &self.store, "customers")
            .await
            .unwrap();
        open_gateway(&self.store)
    }
}

/// Opens a gateway over an existing store.
pub fn open_gateway(store: &Path) -> QueryGateway {
    let client = SqliteStore::open(store, "customers").unwrap();
    QueryGateway::new(Arc::new(client))
}
