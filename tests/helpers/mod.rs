//! In-memory directory and postal services for resolver tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use publiclink_location::sources::postal_pincode::{PincodeRecord, PostOffice};
use publiclink_location::{
    AdministrativeEntity, DirectoryService, LocationError, LocationResolver, PostalLookupService,
    Result,
};

/// Directory backed by fixed listings. Every call is recorded.
///
/// District and taluka listings deliberately include entries of other
/// parents, the way the real service does.
#[derive(Default)]
pub struct FakeDirectory {
    pub states: Vec<AdministrativeEntity>,
    pub districts: HashMap<String, Vec<AdministrativeEntity>>,
    pub talukas: HashMap<String, Vec<AdministrativeEntity>>,
    /// Keyed by "state/district/taluka" names.
    pub villages: HashMap<String, Vec<AdministrativeEntity>>,
    /// Endpoints ("states", "districts", ...) that fail with a network error.
    pub failing: Mutex<Vec<&'static str>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDirectory {
    /// Maharashtra and Gujarat with a few districts, talukas and villages.
    pub fn india() -> Self {
        let all_districts = vec![
            AdministrativeEntity::new("519", "Pune").with_parent("MAHARASHTRA"),
            AdministrativeEntity::new("482", "Mumbai").with_parent("MAHARASHTRA"),
            AdministrativeEntity::new("470", "Surat").with_parent("GUJARAT"),
            AdministrativeEntity::new("474", "Ahmedabad").with_parent("GUJARAT"),
        ];
        let all_talukas = vec![
            AdministrativeEntity::new("4150", "Haveli").with_parent("PUNE"),
            AdministrativeEntity::new("4151", "Mulshi").with_parent("PUNE"),
            AdministrativeEntity::new("4160", "Mumbai City").with_parent("MUMBAI"),
            AdministrativeEntity::new("3901", "Choryasi").with_parent("SURAT"),
        ];

        let mut districts = HashMap::new();
        districts.insert("27".to_string(), all_districts.clone());
        districts.insert("24".to_string(), all_districts);

        let mut talukas = HashMap::new();
        for code in ["519", "482", "470", "474"] {
            talukas.insert(code.to_string(), all_talukas.clone());
        }

        let mut villages = HashMap::new();
        villages.insert(
            "Maharashtra/Pune/Haveli".to_string(),
            vec![
                AdministrativeEntity {
                    code: None,
                    name: "Wagholi".to_string(),
                    parent_name: None,
                },
                AdministrativeEntity::new("556677", "Lohegaon"),
            ],
        );
        villages.insert(
            "Maharashtra/Mumbai/Mumbai City".to_string(),
            vec![AdministrativeEntity::new("600001", "Fort")],
        );

        Self {
            states: vec![
                AdministrativeEntity::new("27", "Maharashtra"),
                AdministrativeEntity::new("24", "Gujarat"),
                AdministrativeEntity::new("29", "Karnataka"),
            ],
            districts,
            talukas,
            villages,
            ..Default::default()
        }
    }

    pub fn fail(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().push(endpoint);
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().retain(|e| *e != endpoint);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str, arg: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", endpoint, arg));
        if self.failing.lock().unwrap().contains(&endpoint) {
            return Err(LocationError::Network(format!("{} unavailable", endpoint)));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryService for FakeDirectory {
    async fn states(&self) -> Result<Vec<AdministrativeEntity>> {
        self.record("states", "")?;
        Ok(self.states.clone())
    }

    async fn districts(&self, state_code: &str) -> Result<Vec<AdministrativeEntity>> {
        self.record("districts", state_code)?;
        Ok(self.districts.get(state_code).cloned().unwrap_or_default())
    }

    async fn talukas(&self, district_code: &str) -> Result<Vec<AdministrativeEntity>> {
        self.record("talukas", district_code)?;
        Ok(self.talukas.get(district_code).cloned().unwrap_or_default())
    }

    async fn villages(
        &self,
        state: &str,
        district: &str,
        taluka: &str,
    ) -> Result<Vec<AdministrativeEntity>> {
        let key = format!("{}/{}/{}", state, district, taluka);
        self.record("villages", &key)?;
        Ok(self.villages.get(&key).cloned().unwrap_or_default())
    }
}

/// Postal service returning one canned record and counting lookups.
pub struct FakePostal {
    pub record: PincodeRecord,
    pub lookups: AtomicUsize,
}

impl FakePostal {
    pub fn success(state: &str, district: &str, block: &str, name: &str) -> Self {
        Self {
            record: PincodeRecord {
                status: "Success".to_string(),
                message: Some("Number of pincode(s) found:1".to_string()),
                post_office: Some(vec![PostOffice {
                    name: name.to_string(),
                    state: state.to_string(),
                    district: district.to_string(),
                    block: Some(block.to_string()),
                }]),
            },
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn not_found() -> Self {
        Self {
            record: PincodeRecord {
                status: "Error".to_string(),
                message: Some("No records found".to_string()),
                post_office: None,
            },
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostalLookupService for FakePostal {
    async fn lookup(&self, _pincode: &str) -> Result<PincodeRecord> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.record.clone())
    }
}

pub fn resolver_with(
    directory: &Arc<FakeDirectory>,
    postal: &Arc<FakePostal>,
) -> LocationResolver {
    LocationResolver::new(directory.clone(), postal.clone())
}
