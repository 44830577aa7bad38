//! IP address classification
//!
//! Decides whether a resolved address is a public destination or falls in one
//! of the ranges the gateway refuses to reach.

use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Why an address is not allowed as a fetch destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressClass {
    /// Private-use, shared, reserved or documentation space
    Private,
    /// 127.0.0.0/8, ::1
    Loopback,
    /// 169.254.0.0/16, fe80::/10
    LinkLocal,
    /// 224.0.0.0/4, ff00::/8
    Multicast,
    /// 0.0.0.0, ::
    Unspecified,
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressClass::Private => "private",
            AddressClass::Loopback => "loopback",
            AddressClass::LinkLocal => "link-local",
            AddressClass::Multicast => "multicast",
            AddressClass::Unspecified => "unspecified",
        };
        f.write_str(name)
    }
}

/// Classify an address. `None` means the address is publicly routable.
pub fn classify(ip: &IpAddr) -> Option<AddressClass> {
    match ip {
        IpAddr::V4(ipv4) => classify_v4(ipv4),
        IpAddr::V6(ipv6) => classify_v6(ipv6),
    }
}

/// Convenience wrapper around [`classify`]
pub fn is_public(ip: &IpAddr) -> bool {
    classify(ip).is_none()
}

fn classify_v4(ip: &Ipv4Addr) -> Option<AddressClass> {
    let octets = ip.octets();

    // Order matters: 0.0.0.0 is also inside 0.0.0.0/8
    if ip.is_unspecified() {
        return Some(AddressClass::Unspecified);
    }
    if ip.is_loopback() {
        return Some(AddressClass::Loopback);
    }
    if ip.is_link_local() {
        return Some(AddressClass::LinkLocal);
    }
    if ip.is_multicast() {
        return Some(AddressClass::Multicast);
    }

    let private = ip.is_private()
        // "This network" (0.0.0.0/8)
        || octets[0] == 0
        // Shared address space (100.64.0.0/10) - RFC 6598
        || (octets[0] == 100 && (octets[1] & 0xC0) == 64)
        // IETF protocol assignments (192.0.0.0/24)
        || (octets[0] == 192 && octets[1] == 0 && octets[2] == 0)
        // Documentation (TEST-NET-1/2/3)
        || ip.is_documentation()
        // Benchmarking (198.18.0.0/15)
        || (octets[0] == 198 && (octets[1] & 0xFE) == 18)
        // Reserved (240.0.0.0/4) and broadcast
        || octets[0] >= 240;

    private.then_some(AddressClass::Private)
}

fn classify_v6(ip: &Ipv6Addr) -> Option<AddressClass> {
    // IPv4-mapped addresses - check the embedded IPv4
    if let Some(ipv4) = ip.to_ipv4_mapped() {
        return classify_v4(&ipv4);
    }

    let segments = ip.segments();

    // NAT64 well-known prefix (64:ff9b::/96) and 6to4 (2002::/16) carry an IPv4
    // address that a translator or relay will reach; classify that address
    if let Some(ipv4) = embedded_ipv4(&segments) {
        if let Some(class) = classify_v4(&ipv4) {
            return Some(class);
        }
    }

    if ip.is_unspecified() {
        return Some(AddressClass::Unspecified);
    }
    if ip.is_loopback() {
        return Some(AddressClass::Loopback);
    }
    // Link-local (fe80::/10)
    if (segments[0] & 0xffc0) == 0xfe80 {
        return Some(AddressClass::LinkLocal);
    }
    if ip.is_multicast() {
        return Some(AddressClass::Multicast);
    }

    let private =
        // Unique local (fc00::/7)
        (segments[0] & 0xfe00) == 0xfc00
        // Site-local, deprecated (fec0::/10)
        || (segments[0] & 0xffc0) == 0xfec0
        // Documentation (2001:db8::/32)
        || (segments[0] == 0x2001 && segments[1] == 0x0db8)
        // Discard-only (100::/64)
        || (segments[0] == 0x0100 && segments[1..4].iter().all(|s| *s == 0))
        // IETF protocol assignments (2001::/23)
        || (segments[0] == 0x2001 && segments[1] < 0x0200);

    private.then_some(AddressClass::Private)
}

fn embedded_ipv4(segments: &[u16; 8]) -> Option<Ipv4Addr> {
    let [a, b, c, d, e, f, g, h] = *segments;
    let (hi, lo) = if a == 0x0064 && b == 0xff9b && c == 0 && d == 0 && e == 0 && f == 0 {
        (g, h)
    } else if a == 0x2002 {
        (b, c)
    } else {
        return None;
    };
    Some(Ipv4Addr::from((u32::from(hi) << 16) | u32::from(lo)))
}
