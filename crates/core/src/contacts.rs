use serde::{Deserialize, Serialize};

/// Emergency contact information payload (static, no external dependency)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyInfo {
    pub emergency_contacts: EmergencyContacts,
}

/// Per-region and general emergency contact sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContacts {
    pub india: RegionContacts,
    pub general: GeneralContacts,
}

/// Region-specific emergency service numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionContacts {
    pub emergency: String,
    pub police: String,
    pub fire: String,
    pub ambulance: String,
}

/// General guidance when no regional numbers apply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralContacts {
    pub emergency: String,
    pub advice: String,
}

impl EmergencyInfo {
    /// Build the fixed emergency contact payload served by the API
    pub fn new() -> Self {
        Self {
            emergency_contacts: EmergencyContacts {
                india: RegionContacts {
                    emergency: "112 or 108".to_string(),
                    police: "100".to_string(),
                    fire: "101".to_string(),
                    ambulance: "102".to_string(),
                },
                general: GeneralContacts {
                    emergency: "Local emergency services".to_string(),
                    advice: "Call immediately for: Chest pain, Difficulty breathing, \
                             Severe bleeding, Stroke symptoms"
                        .to_string(),
                },
            },
        }
    }
}

impl Default for EmergencyInfo {
    fn default() -> Self {
        Self::new()
    }
}
