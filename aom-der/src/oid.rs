//! OBJECT IDENTIFIER and RELATIVE-OID content codec
//!
//! Content is a series of subidentifiers, each a big-endian base-128 number
//! with bit 8 set on every octet but the last. In an OBJECT IDENTIFIER the
//! first subidentifier packs the first two arcs as `40 * X + Y`.

use aom_core::{AomError, AomResult};

const CONTINUATION: u8 = 0x80;

/// Decode OBJECT IDENTIFIER content into dotted form
///
/// `offset` is the absolute position of the content, for diagnostics.
pub fn decode_oid(bytes: &[u8], offset: usize) -> AomResult<String> {
    let arcs = read_subidentifiers(bytes, offset)?;
    let Some((&first, rest)) = arcs.split_first() else {
        return Err(AomError::invalid_data(offset, bytes.len(), "empty object identifier"));
    };

    // Below 80 this is floor(first / 40) and first mod 40; from 80 on the
    // first arc is 2 and the second takes the remainder.
    let (x, y) = if first < 80 { (first / 40, first % 40) } else { (2, first - 80) };

    let mut dotted = format!("{}.{}", x, y);
    for arc in rest {
        dotted.push('.');
        dotted.push_str(&arc.to_string());
    }
    Ok(dotted)
}

/// Decode RELATIVE-OID content into dotted form
pub fn decode_relative_oid(bytes: &[u8], offset: usize) -> AomResult<String> {
    let arcs = read_subidentifiers(bytes, offset)?;
    if arcs.is_empty() {
        return Err(AomError::invalid_data(offset, bytes.len(), "empty relative object identifier"));
    }
    Ok(arcs.iter().map(u64::to_string).collect::<Vec<_>>().join("."))
}

/// Encode a dotted OBJECT IDENTIFIER
///
/// # Error Handling
/// Returns `Serialization` when the text is not a dotted number list, has
/// fewer than two arcs, or its first two arcs cannot be combined (first arc
/// above 2, or second arc above 39 under arcs 0 and 1).
pub fn encode_oid(dotted: &str) -> AomResult<Vec<u8>> {
    let arcs = parse_arcs(dotted)?;
    if arcs.len() < 2 {
        return Err(AomError::Serialization(format!(
            "object identifier \"{}\" must have at least 2 arcs",
            dotted
        )));
    }

    let (x, y) = (arcs[0], arcs[1]);
    if x > 2 || (x < 2 && y >= 40) {
        return Err(AomError::Serialization(format!(
            "object identifier \"{}\" has invalid leading arcs {}.{}",
            dotted, x, y
        )));
    }
    let first = (x * 40)
        .checked_add(y)
        .ok_or_else(|| AomError::Serialization(format!("object identifier arc too large in \"{}\"", dotted)))?;

    let mut bytes = Vec::with_capacity(arcs.len() * 2);
    push_subidentifier(&mut bytes, first);
    for &arc in &arcs[2..] {
        push_subidentifier(&mut bytes, arc);
    }
    Ok(bytes)
}

/// Encode a dotted RELATIVE-OID
pub fn encode_relative_oid(dotted: &str) -> AomResult<Vec<u8>> {
    let arcs = parse_arcs(dotted)?;
    let mut bytes = Vec::with_capacity(arcs.len() * 2);
    for arc in arcs {
        push_subidentifier(&mut bytes, arc);
    }
    Ok(bytes)
}

fn parse_arcs(dotted: &str) -> AomResult<Vec<u64>> {
    dotted
        .split('.')
        .map(|arc| {
            arc.parse::<u64>().map_err(|_| {
                AomError::Serialization(format!("invalid object identifier \"{}\"", dotted))
            })
        })
        .collect()
}

/// Append the minimal base-128 group for `value`
fn push_subidentifier(bytes: &mut Vec<u8>, value: u64) {
    let mut group = Vec::with_capacity(10);
    let mut temp = value;
    loop {
        group.push((temp & 0x7F) as u8);
        temp >>= 7;
        if temp == 0 {
            break;
        }
    }

    // Reverse and set continuation bits
    let last = group.len() - 1;
    for (i, &byte) in group.iter().rev().enumerate() {
        if i < last {
            bytes.push(byte | CONTINUATION);
        } else {
            bytes.push(byte);
        }
    }
}

fn read_subidentifiers(bytes: &[u8], offset: usize) -> AomResult<Vec<u64>> {
    let mut arcs = Vec::new();
    let mut value = 0u64;
    let mut group_start = true;

    for (i, &byte) in bytes.iter().enumerate() {
        // DER forbids padding a subidentifier with a leading 0x80
        if group_start && byte == CONTINUATION {
            return Err(AomError::invalid_data(
                offset + i,
                bytes.len() - i,
                "object identifier subidentifier starts with 0x80",
            ));
        }
        if value > (u64::MAX >> 7) {
            return Err(AomError::invalid_data(
                offset + i,
                bytes.len() - i,
                "object identifier arc exceeds 64 bits",
            ));
        }
        value = (value << 7) | (byte & !CONTINUATION) as u64;

        if byte & CONTINUATION == 0 {
            arcs.push(value);
            value = 0;
            group_start = true;
        } else {
            group_start = false;
        }
    }

    if !group_start {
        return Err(AomError::invalid_data(
            offset + bytes.len(),
            0,
            "object identifier ends inside a subidentifier",
        ));
    }
    Ok(arcs)
}
