//! Known base-box images, flavors and management users.
//!
//! The first entry of each list is the default used when a project file
//! leaves the field out. Values outside the catalog are accepted; the
//! platform may know images this list does not.

/// Base-box images offered for hosts, routers and containers
pub const IMAGES: &[&str] = &[
    "Win10_x86-64",
    "alpine",
    "cirros",
    "debian",
    "debian-10",
    "debian-10-x86_64",
    "debian-11",
    "debian-11-man",
    "debian-11-x86_64",
    "debian-12.7",
    "debian-9-x86_64",
    "kali",
    "ubuntu-focal-x86_64",
    "xubuntu-18.04",
    "debian-11-man-preinstalled",
    "centos-7.9",
    "cirros-0-x86_64",
    "kali-2020.4",
    "ubuntu-bionic-x86_64",
    "windows-10",
    "windows-server-2019",
];

/// Instance flavors
pub const FLAVORS: &[&str] = &[
    "csirtmu.medium4x8",
    "csirtmu.tiny1x2",
    "m1.large",
    "m1.large2",
    "m1.medium",
    "m1.small",
    "m1.tiny",
    "m1.xlarge",
    "m2.tiny",
    "standard.large",
    "standard.medium",
    "standard.small",
    "standart.xlarge",
];

/// Management users baked into the images
pub const MANAGEMENT_USERS: &[&str] = &["debian", "windows", "ubuntu", "cirros", "centos"];

/// Which catalog list a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Image,
    Flavor,
    ManagementUser,
}

impl CatalogKind {
    pub fn entries(self) -> &'static [&'static str] {
        match self {
            CatalogKind::Image => IMAGES,
            CatalogKind::Flavor => FLAVORS,
            CatalogKind::ManagementUser => MANAGEMENT_USERS,
        }
    }

    /// Default value, i.e. the first catalog entry
    pub fn default_value(self) -> &'static str {
        self.entries()[0]
    }

    pub fn contains(self, value: &str) -> bool {
        self.entries().iter().any(|entry| *entry == value)
    }
}

/// Trim a user value, falling back to the catalog default when it is absent
/// or blank. Unknown values are kept and logged.
pub fn resolve(kind: CatalogKind, value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => {
            if !kind.contains(v) {
                log::debug!("{:?} '{}' is not in the built-in catalog", kind, v);
            }
            v.to_string()
        }
        None => kind.default_value().to_string(),
    }
}
