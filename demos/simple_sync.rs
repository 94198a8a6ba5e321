use rollsync::{build_signatures_with_block_size, delta_commands, generate_delta_with_block_size};

fn main() {
    let source = b"i am here guys how are you doing this is a small test for chunk split and rolling hash";
    let target = b"i am here guys how are you doingadded this is a small test for chunk split and rolling hash";

    let block_size = 16;

    // Step 1: checksum the source block by block.
    let signatures = build_signatures_with_block_size(&source[..], block_size).unwrap();
    println!("{} source blocks", signatures.len());

    // Step 2: scan the target against the signature table.
    let delta = generate_delta_with_block_size(&target[..], &signatures, block_size).unwrap();

    let mut indices: Vec<_> = delta.keys().copied().collect();
    indices.sort_unstable();
    for index in indices {
        let entry = &delta[&index];
        if entry.missing {
            println!("block {index}: missing ({}..{})", entry.start, entry.offset);
        } else if entry.lit.is_empty() {
            println!("block {index}: matched");
        } else {
            println!(
                "block {index}: matched after literal {:?}",
                String::from_utf8_lossy(&entry.lit)
            );
        }
    }

    // Step 3: the same delta as an ordered command stream.
    for command in delta_commands(&delta, block_size) {
        println!("{command:?}");
    }
}
