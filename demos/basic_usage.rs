//! Basic usage example for bser
//!
//! Run with: cargo run --example basic_usage

use bser::*;

fn main() -> Result<()> {
    println!("BSER Basic Usage Example");
    println!("========================");

    // Example 1: Encode a value tree and decode it back
    println!("\n1. Value Roundtrip:");
    {
        let file: Value = vec![
            ("name", Value::from("src/lib.rs")),
            ("size", Value::Integer(4096)),
            ("exists", Value::Bool(true)),
            ("mtime_ms", Value::Double(1_700_000_000_123.0)),
        ]
        .into_iter()
        .collect();

        let body = to_vec(&file)?;
        println!("  Encoded {} bytes", body.len());

        let decoded = from_slice(&body)?;
        println!(
            "  Decoded: name={:?}, size={:?}, exists={:?}",
            decoded.get("name").and_then(Value::as_str),
            decoded.get("size").and_then(Value::as_i64),
            decoded.get("exists").and_then(Value::as_bool),
        );
        assert_eq!(decoded, file);
    }

    // Example 2: Framing into a PDU
    println!("\n2. PDU Framing:");
    {
        let command = Value::Array(vec![Value::from("watch-list")]);
        let pdu = to_pdu(&command)?;
        println!("  PDU: {:02x?}", pdu);

        let (decoded, used) = from_pdu_slice(&pdu)?;
        println!("  Decoded {:?} from {} bytes", decoded, used);
    }

    // Example 3: Integer width selection
    println!("\n3. Integer Widths:");
    {
        for n in [0i64, 127, 128, -32769, 1 << 40] {
            let minimal = to_vec(&Value::Integer(n))?;
            let fixed = to_vec_with(
                &Value::Integer(n),
                &Config::new().with_width_policy(WidthPolicy::Fixed64),
            )?;
            println!(
                "  {:>14}: minimal {} bytes, fixed {} bytes",
                n,
                minimal.len(),
                fixed.len()
            );
        }
    }

    // Example 4: Templated arrays with skipped fields
    println!("\n4. Templated Array:");
    {
        let mut encoder = Encoder::new();
        encoder.put_u8(tag::TEMPLATE);
        encoder.put_u8(tag::ARRAY);
        encoder.put_int(2);
        encoder.put_string(b"name")?;
        encoder.put_string(b"size")?;
        encoder.put_int(2);
        encoder.put_string(b"a.txt")?;
        encoder.put_int(10);
        encoder.put_string(b"b.txt")?;
        encoder.put_u8(tag::SKIP);

        let rows = from_slice(encoder.as_slice())?;
        for row in rows.as_array().unwrap_or_default() {
            println!(
                "  name={:?} size={:?}",
                row.get("name").and_then(Value::as_str),
                row.get("size").and_then(Value::as_i64)
            );
        }
    }

    // Example 5: Streaming several PDUs through one buffer
    println!("\n5. Stream of PDUs:");
    {
        let config = Config::default();
        let mut wire = Vec::new();
        for i in 0..3 {
            write_value(&mut wire, &Value::Integer(i), &config)?;
        }
        println!("  Wrote {} bytes", wire.len());

        let mut reader = &wire[..];
        while !reader.is_empty() {
            println!("  Read {:?}", read_value(&mut reader, &config)?);
        }
    }

    // Example 6: Errors on malformed input
    println!("\n6. Malformed Input:");
    {
        let truncated = &to_vec(&Value::from("truncated"))?[..4];
        println!("  truncated body: {:?}", from_slice(truncated));
        println!("  bad magic: {:?}", from_pdu_slice(&[0x01, 0x00, 0x03, 0x00]));
        println!("  skip at top level: {:?}", from_slice(&[tag::SKIP]));
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
