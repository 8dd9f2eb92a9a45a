/// Address derivation helpers for network and router mappings.
///
/// The CIDR is treated as a plain string: its first three dot-separated
/// components become the address prefix. Nothing here checks octet bounds or
/// the prefix length.

/// Last octet assigned to a router on every network it joins
pub const ROUTER_LAST_OCTET: &str = "1";

/// Return the first three dot-separated components of a CIDR string
///
/// # Examples
/// ```
/// use topogen::utils::ip_utils::cidr_prefix;
///
/// assert_eq!(cidr_prefix("10.1.2.0/24"), Some("10.1.2".to_string()));
/// assert_eq!(cidr_prefix("10.1"), None);
/// ```
pub fn cidr_prefix(cidr: &str) -> Option<String> {
    let parts: Vec<&str> = cidr.split('.').collect();
    if parts.len() < 3 {
        return None;
    }
    Some(parts[..3].join("."))
}

/// Derive an IP address from a CIDR string and a caller-supplied last octet
///
/// Returns `None` when the CIDR has fewer than three components.
///
/// # Examples
/// ```
/// use topogen::utils::ip_utils::derive_ip;
///
/// assert_eq!(derive_ip("192.168.10.0/24", "15"), Some("192.168.10.15".to_string()));
/// assert_eq!(derive_ip("192.168.10.0/24", "300"), Some("192.168.10.300".to_string()));
/// ```
pub fn derive_ip(cidr: &str, last_octet: &str) -> Option<String> {
    cidr_prefix(cidr).map(|prefix| format!("{}.{}", prefix, last_octet))
}

/// Address used when the referenced network cannot supply a prefix
pub fn placeholder_ip(last_octet: &str) -> String {
    format!("?.?.?.{}", last_octet)
}
