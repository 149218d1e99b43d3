use std::env;
use std::fs;

use gramtree_core::model::counts::count_ngrams;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Each file becomes one document in the batch; windows never span
    // documents
    let files: Vec<String> = env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("usage: gramtree-demo <text file> [<text file> ...]");
        std::process::exit(2);
    }

    let mut inputs = Vec::new();
    for file in &files {
        inputs.push(fs::read_to_string(file)?);
    }

    for (n, name) in [(2, "bigrams"), (3, "trigrams"), (4, "tetragrams")] {
        let data = count_ngrams(&inputs, n)?;
        println!("{name}: {} windows, {} distinct first tokens", data.count, data.lookup.len());

        // The summary is sorted by count, so the first entries are the
        // most common window openers
        for node in data.summary.iter().take(5) {
            println!(
                "  {:<16} count {:<6} prob {:.3} cumprob {:.3}",
                node.token, node.count, node.prob, node.cumprob
            );
        }
    }

    Ok(())
}
