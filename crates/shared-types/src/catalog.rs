//! Static catalogs shared by the rating engine and the document renderers
//!
//! Both tables are process-wide constants. Their contents are part of the
//! document format: renamed or reordered entries change what reports and
//! the compliance view show.

/// One rung of the five-level maturity scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingLevel {
    pub level: u8,
    pub name: &'static str,
    pub description: &'static str,
}

pub const RATING_LEVELS: [RatingLevel; 5] = [
    RatingLevel {
        level: 1,
        name: "Initial",
        description: "Basic infrastructure with minimal compliance",
    },
    RatingLevel {
        level: 2,
        name: "Developing",
        description: "Standard safety and maintenance protocols",
    },
    RatingLevel {
        level: 3,
        name: "Established",
        description: "Good management practices and compliance",
    },
    RatingLevel {
        level: 4,
        name: "Advanced",
        description: "Quantitative management and sustainability",
    },
    RatingLevel {
        level: 5,
        name: "Exemplary",
        description: "LEED certified, best-in-class facilities",
    },
];

/// A certificate every society is expected to hold (or may optionally hold)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateSpec {
    pub name: &'static str,
    pub category: &'static str,
    pub mandatory: bool,
}

const fn cert(name: &'static str, category: &'static str, mandatory: bool) -> CertificateSpec {
    CertificateSpec {
        name,
        category,
        mandatory,
    }
}

/// Master certificate list, in display order
pub const CERTIFICATE_CATALOG: [CertificateSpec; 20] = [
    cert("Earthquake Resistance Certificate (Zone 3)", "Structural", true),
    cert("Earthquake Resistance Certificate (Zone 4)", "Structural", true),
    cert("Earthquake Resistance Certificate (Zone 5)", "Structural", true),
    cert("Structural Stability Certificate", "Structural", true),
    cert("Fire Safety NOC", "Fire Safety", true),
    cert("Fire Extinguisher Maintenance", "Fire Safety", true),
    cert("Building Completion Certificate", "Legal", true),
    cert("Occupancy Certificate", "Legal", true),
    cert("Property Tax Clearance", "Legal", true),
    cert("Water Quality Certificate", "Utilities", true),
    cert("Electrical Safety Audit", "Utilities", true),
    cert("Lift/Elevator Safety Certificate", "Utilities", true),
    cert("Environmental Clearance", "Environmental", true),
    cert("Rainwater Harvesting Compliance", "Environmental", false),
    cert("Solar Panel Installation Certificate", "Environmental", false),
    cert("Waste Management Compliance", "Environmental", true),
    cert("LEED Green Building Certification", "Green Building", false),
    cert("Energy Audit Certificate", "Green Building", false),
    cert("STP (Sewage Treatment Plant) Certificate", "Environmental", true),
    cert("Swimming Pool Safety Certificate", "Amenities", false),
];

/// Look up a catalog entry by exact name
pub fn find_certificate(name: &str) -> Option<&'static CertificateSpec> {
    CERTIFICATE_CATALOG.iter().find(|spec| spec.name == name)
}
