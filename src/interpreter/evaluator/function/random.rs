use std::{fmt::Write, net::Ipv4Addr};

use crate::{interpreter::value::core::Value, util::num::f64_to_index};

/// Longest string `random_string` will produce.
const MAX_RANDOM_STRING_LEN: usize = 64 * 1024;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn random_bytes<const N: usize>() -> Result<[u8; N], String> {
    let mut bytes = [0u8; N];
    getrandom::fill(&mut bytes).map_err(|err| format!("no randomness available: {err}"))?;
    Ok(bytes)
}

/// A random version 4 UUID in its hyphenated lowercase form.
///
/// # Example
/// ```
/// use brickengine::{Context, Functions, run_script};
///
/// let id = run_script("uuid()", &mut Context::new(), &Functions::with_builtins()).unwrap();
///
/// assert_eq!(id.len(), 36);
/// assert_eq!(&id[14..15], "4");
/// ```
pub(super) fn uuid(_: &[Value]) -> Result<Value, String> {
    let mut bytes = random_bytes::<16>()?;
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let mut out = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        let _ = write!(out, "{byte:02x}");
    }
    Ok(Value::String(out))
}

/// A random string of ASCII letters and digits.
///
/// Bytes are drawn in batches and the ones that would bias the alphabet are
/// thrown away.
pub(super) fn random_string(args: &[Value]) -> Result<Value, String> {
    let Some(Value::Number(n)) = args.first() else {
        return Err("argument 1 must be a number".to_owned());
    };
    let length =
        f64_to_index(*n, 0).map_err(|_| format!("length must be a non-negative integer, found {n}"))?;
    if length > MAX_RANDOM_STRING_LEN {
        return Err(format!("length must be at most {MAX_RANDOM_STRING_LEN}, found {length}"));
    }

    let unbiased = u8::MAX - u8::MAX % 62;
    let mut out = String::with_capacity(length);
    while out.len() < length {
        for byte in random_bytes::<64>()? {
            if out.len() == length {
                break;
            }
            if byte < unbiased {
                out.push(char::from(ALPHANUMERIC[usize::from(byte % 62)]));
            }
        }
    }
    Ok(Value::String(out))
}

/// A random unicast, locally administered MAC address such as
/// `"36:0f:a2:11:9c:e4"`.
pub(super) fn random_mac(_: &[Value]) -> Result<Value, String> {
    let mut bytes = random_bytes::<6>()?;
    bytes[0] = (bytes[0] | 0x02) & 0xfe;

    let octets: Vec<String> = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
    Ok(Value::String(octets.join(":")))
}

/// A random IPv4 address inside a CIDR block such as `"10.20.0.0/16"`.
///
/// Host bits are random; network bits are taken from the block. A `/32`
/// block yields its own address.
///
/// # Example
/// ```
/// use brickengine::{Context, Functions, run_script};
///
/// let ip = run_script("random_ipv4_in('192.168.7.0/24')",
///                     &mut Context::new(),
///                     &Functions::with_builtins()).unwrap();
///
/// assert!(ip.starts_with("192.168.7."));
/// ```
pub(super) fn random_ipv4_in(args: &[Value]) -> Result<Value, String> {
    let Some(Value::String(block)) = args.first() else {
        return Err("argument 1 must be a string".to_owned());
    };
    let (network, prefix) = parse_cidr(block)?;

    let netmask = u32::MAX.checked_shl(32 - prefix).unwrap_or(0);
    let host = u32::from_be_bytes(random_bytes::<4>()?);
    let address = (u32::from(network) & netmask) | (host & !netmask);

    Ok(Value::String(Ipv4Addr::from(address).to_string()))
}

fn parse_cidr(block: &str) -> Result<(Ipv4Addr, u32), String> {
    let invalid = || format!("\"{block}\" is not an IPv4 block like 10.0.0.0/8");

    let (address, prefix) = block.trim().split_once('/').ok_or_else(invalid)?;
    let address: Ipv4Addr = address.parse().map_err(|_| invalid())?;
    let prefix: u32 = prefix.parse().map_err(|_| invalid())?;
    if prefix > 32 {
        return Err(invalid());
    }
    Ok((address, prefix))
}
