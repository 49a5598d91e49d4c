// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Privacy manager proxy. Features travel as lists of names and are
// converted to and from the SDK bitmask here.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use pushbridge_core::error::Result;
use pushbridge_core::types::FeatureSet;
use pushbridge_sdk::PrivacyCapability;

use crate::provider::Provider;

pub struct PrivacyProxy {
    privacy: Provider<Arc<dyn PrivacyCapability>>,
}

impl PrivacyProxy {
    pub fn new(privacy: Provider<Arc<dyn PrivacyCapability>>) -> Self {
        Self { privacy }
    }

    pub fn enabled_features(&self) -> Result<Vec<&'static str>> {
        Ok(self.privacy.get()?.enabled_features().names())
    }

    pub fn set_enabled_features(&self, features: &Value) -> Result<()> {
        let privacy = self.privacy.get()?;
        let features = FeatureSet::from_names(features)?;
        privacy.set_enabled_features(features);
        info!(features = ?features.names(), "enabled features set");
        Ok(())
    }

    pub fn enable_features(&self, features: &Value) -> Result<()> {
        let privacy = self.privacy.get()?;
        privacy.enable_features(FeatureSet::from_names(features)?);
        Ok(())
    }

    pub fn disable_features(&self, features: &Value) -> Result<()> {
        let privacy = self.privacy.get()?;
        privacy.disable_features(FeatureSet::from_names(features)?);
        Ok(())
    }

    /// Whether every named feature is enabled.
    pub fn is_feature_enabled(&self, features: &Value) -> Result<bool> {
        let privacy = self.privacy.get()?;
        Ok(privacy.is_enabled(FeatureSet::from_names(features)?))
    }
}
