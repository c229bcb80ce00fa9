use serde::{Deserialize, Serialize};

use crate::media::ImageSource;

/// Adoptable animal as stored in the `cats` table
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Pet {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub health_status: Option<String>,
    #[serde(default)]
    pub is_adopted: Option<bool>,
    #[serde(default)]
    pub image_url: Option<ImageSource>,
}

pub const PET_COLUMNS: &str =
    "id, name, age, gender, province, district, story, health_status, is_adopted, image_url";

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl Pet {
    pub fn display_name(&self) -> &str {
        non_blank(&self.name).unwrap_or("น้องแมว")
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_adopted.unwrap_or(false) {
            "ได้รับการรับเลี้ยงแล้ว"
        } else {
            "กำลังหาบ้าน"
        }
    }

    /// "province · district", skipping whichever is missing.
    pub fn area(&self) -> Option<String> {
        let parts: Vec<&str> = [non_blank(&self.province), non_blank(&self.district)]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }

    pub fn age(&self) -> Option<&str> {
        non_blank(&self.age)
    }

    pub fn health_status(&self) -> Option<&str> {
        non_blank(&self.health_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_when_blank() {
        let pet = Pet {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(pet.display_name(), "น้องแมว");
    }

    #[test]
    fn area_joins_present_parts() {
        let mut pet = Pet {
            province: Some("เชียงใหม่".into()),
            district: Some("เมือง".into()),
            ..Default::default()
        };
        assert_eq!(pet.area().as_deref(), Some("เชียงใหม่ · เมือง"));

        pet.province = None;
        assert_eq!(pet.area().as_deref(), Some("เมือง"));

        pet.district = None;
        assert_eq!(pet.area(), None);
    }

    #[test]
    fn adoption_status_defaults_to_looking_for_home() {
        let mut pet = Pet::default();
        assert_eq!(pet.status_label(), "กำลังหาบ้าน");
        pet.is_adopted = Some(true);
        assert_eq!(pet.status_label(), "ได้รับการรับเลี้ยงแล้ว");
    }
}
