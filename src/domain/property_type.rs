// src/domain/property_type.rs

/// Coarse property classification from the assessment roll. Only
/// `Residential` and `Condominium` participate in price-per-area fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyType {
    Residential,
    Condominium,
    MultiFamily,
    Vacant,
    Other,
}

impl PropertyType {
    /// `None` means the type field was absent and the row is dropped;
    /// an unrecognized label maps to `Other` and survives the join.
    pub fn parse(label: &str) -> PropertyType {
        match label {
            "Residential" => PropertyType::Residential,
            "Condominium" => PropertyType::Condominium,
            "Multi-Family" => PropertyType::MultiFamily,
            "Vacant Land" => PropertyType::Vacant,
            _ => PropertyType::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Residential => "Residential",
            PropertyType::Condominium => "Condominium",
            PropertyType::MultiFamily => "Multi-Family",
            PropertyType::Vacant => "Vacant Land",
            PropertyType::Other => "Other",
        }
    }

    pub fn is_dwelling(self) -> bool {
        matches!(self, PropertyType::Residential | PropertyType::Condominium)
    }
}
