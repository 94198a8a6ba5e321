use std::fs::File;

use rollsync::{build_signatures_with_block_size, read_signatures, write_signatures};

fn main() {
    let source = b"hello world this is a test for my seek block";

    let signatures = build_signatures_with_block_size(&source[..], 8).unwrap();

    let path = std::env::temp_dir().join("rollsync-demo.sig");
    write_signatures(File::create(&path).unwrap(), &signatures).unwrap();
    println!("wrote {} signatures to {}", signatures.len(), path.display());

    let restored = read_signatures(File::open(&path).unwrap()).unwrap();
    assert_eq!(restored, signatures);

    for (index, signature) in restored.iter().enumerate() {
        println!(
            "block {index}: weak={:#010x} strong={}",
            signature.weak, signature.strong
        );
    }
}
