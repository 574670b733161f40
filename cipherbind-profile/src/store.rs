//! Profile storage guarded by validation.
//!
//! Every write goes through [`ProfileValidator`]; a profile with any
//! validation error is rejected whole and the store is left untouched.

use crate::error::{ProfileError, ProfileResult};
use crate::profile::EncryptionProfile;
use crate::validator::ProfileValidator;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Saved encryption profiles, keyed and ordered by id.
#[derive(Debug, Default, Clone)]
pub struct ProfileStore {
    profiles: BTreeMap<String, EncryptionProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a profile, replacing any profile with the same id.
    pub fn save(
        &mut self,
        validator: &ProfileValidator<'_>,
        profile: EncryptionProfile,
    ) -> ProfileResult<()> {
        Self::check(validator, &profile)?;
        info!(profile_id = %profile.id, algorithm_id = %profile.algorithm_id, "Encryption profile saved");
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EncryptionProfile> {
        self.profiles.get(id)
    }

    /// All profiles in id order.
    pub fn list(&self) -> Vec<&EncryptionProfile> {
        self.profiles.values().collect()
    }

    pub fn remove(&mut self, id: &str) -> ProfileResult<EncryptionProfile> {
        let removed = self
            .profiles
            .remove(id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;
        info!(profile_id = %id, "Encryption profile removed");
        Ok(removed)
    }

    /// Ids of the profiles bound to `key_id`.
    pub fn profiles_using_key(&self, key_id: &str) -> Vec<&str> {
        self.profiles
            .values()
            .filter(|p| p.key_id == key_id)
            .map(|p| p.id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Imports a JSON array of profiles. Either every profile is valid and
    /// all are stored, or nothing is stored.
    pub fn import_json(
        &mut self,
        validator: &ProfileValidator<'_>,
        json: &str,
    ) -> ProfileResult<usize> {
        let incoming: Vec<EncryptionProfile> = serde_json::from_str(json)?;
        for profile in &incoming {
            Self::check(validator, profile)?;
        }

        let count = incoming.len();
        for profile in incoming {
            self.profiles.insert(profile.id.clone(), profile);
        }
        info!(count, "Encryption profiles imported");
        Ok(count)
    }

    /// Exports all profiles as a pretty-printed JSON array.
    pub fn export_json(&self) -> ProfileResult<String> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }

    fn check(validator: &ProfileValidator<'_>, profile: &EncryptionProfile) -> ProfileResult<()> {
        if profile.id.trim().is_empty() {
            return Err(ProfileError::Invalid {
                profile_id: profile.id.clone(),
                message: "profile id is empty".to_string(),
            });
        }

        let errors = validator.validate(profile);
        if errors.is_empty() {
            return Ok(());
        }

        let err = ProfileError::invalid(&profile.id, &errors);
        warn!(profile_id = %profile.id, "Rejected encryption profile: {}", err);
        Err(err)
    }
}
