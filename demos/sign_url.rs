//! Run this example with the following command in a terminal:
//!
//! ```console
//! $ cargo run --example sign_url
//! ```

use cfsignurl::{PrivateKey, Protocol, SignedUrlBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Import the private key registered with the distribution, testing key, do not use
    let private_key = include_str!("../tests/data/private_key.pem");
    let private_key = PrivateKey::from_pem(private_key).expect("PrivateKey parsed from pem");

    // Whitespace in the path becomes `+`, nothing else is encoded
    let builder = SignedUrlBuilder::new("d123.example.net", "testfolder/sample file.csv");

    // Optional: https is used by default
    let builder = builder.protocol(Protocol::Https);

    // Optional: the URL expires one day after signing unless told otherwise
    let builder = builder.retention_days(7);

    // Optional: an absolute expiration wins over the retention
    let builder = builder
        .expiration(1750000000)
        .expect("SignedUrlBuilder with expiration timestamp");
    // Comment the previous statement to expire 7 days from now.

    // Sign the URL using the private key!
    let signed = builder
        .sign(&private_key, "APKAEXAMPLE")
        .expect("Signed URL");

    // Let's display the signed URL, then the same thing as json
    println!("{signed}");
    let json = serde_json::to_string(&signed).expect("SignedUrl serialized to json");
    println!("{json}");

    Ok(())
}
