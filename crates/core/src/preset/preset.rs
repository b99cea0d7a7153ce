use serde::{Deserialize, Serialize};

/// A named snapshot of engine status lines
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    status: Option<Vec<String>>,
    #[serde(default)]
    pub saved_at: Option<String>,
}

impl Preset {
    pub fn new(name: String) -> Self {
        Self {
            name,
            status: None,
            saved_at: None,
        }
    }

    pub fn status(&self) -> Option<&[String]> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: Vec<String>) {
        self.status = Some(status);
        self.saved_at = Some(chrono::Utc::now().to_rfc3339());
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
    }
}
