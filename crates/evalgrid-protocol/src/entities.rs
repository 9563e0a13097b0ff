use serde::{Deserialize, Serialize};

/// An employee record as served by the backend. Employees double as the
/// pool of expert reviewers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Employee {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub surname: String,
    #[serde(default)]
    pub mail_box: String,
    #[serde(default)]
    pub number_phone: String,
    #[serde(default)]
    pub role_id: i64,
}

impl Employee {
    /// "last first patronymic", the form used for sorting and search.
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.surname)
    }
}

/// An organizational unit being scored. The backend serves these under
/// `name_of_department`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Department {
    pub id: i64,
    #[serde(rename = "name_of_department")]
    pub name: String,
    #[serde(default)]
    pub affiliation: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Section {
    pub description: String,
}

/// An evaluation metric definition. Everything past the id is descriptive
/// metadata; most fields are optional on the wire.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Metric {
    pub metric_id: i64,
    #[serde(default)]
    pub metric_number: Option<i64>,
    #[serde(default)]
    pub metric_subnumber: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit_of_measurement: Option<String>,
    #[serde(default)]
    pub base_level: Option<String>,
    #[serde(default)]
    pub average_level: Option<String>,
    #[serde(default)]
    pub goal_level: Option<String>,
    #[serde(default)]
    pub measurement_frequency: Option<String>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub section_id: i64,
    #[serde(default)]
    pub section: Option<Section>,
}

impl Metric {
    /// Subnumber as displayed. Some rows carry a literal "null" string
    /// instead of an absent field; both render as empty.
    pub fn subnumber(&self) -> &str {
        match self.metric_subnumber.as_deref() {
            None => "",
            Some(s) if s.eq_ignore_ascii_case("null") => "",
            Some(s) => s,
        }
    }

    /// Column label: number immediately followed by subnumber ("7a").
    pub fn label(&self) -> String {
        match self.metric_number {
            Some(n) => format!("{}{}", n, self.subnumber()),
            None => self.subnumber().to_string(),
        }
    }
}
