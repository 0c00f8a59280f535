//! Image path command - generate storage paths for uploaded recipe images

use std::io::{self, Read};
use std::process::exit;

use anyhow::Result;
use colored::Colorize;
use recipe_core::adapters::ids::{FixedIdGenerator, RandomIdGenerator};
use recipe_core::ports::IdGenerator;
use recipe_core::services::UploadPathGenerator;
use recipe_core::OperationResult;

use super::get_context;

pub fn run(filenames: Vec<String>, fixed_id: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Filenames from arguments, or one per line on stdin
    let names: Vec<String> = if filenames.is_empty() && atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
            .lines()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        filenames
    };

    if names.is_empty() {
        anyhow::bail!("No file names provided. Pass them as arguments or pipe them on stdin.");
    }

    let prefix = ctx.config.recipe_image_dir.as_str();
    // --fixed-id pins the identifier, for previews and reproducible output
    let results = match fixed_id {
        Some(id) => {
            let generator = UploadPathGenerator::with_id_generator(FixedIdGenerator::new(id));
            generate(&generator.with_prefix(prefix), &names)
        }
        None => {
            let generator = UploadPathGenerator::with_id_generator(RandomIdGenerator);
            generate(&generator.with_prefix(prefix), &names)
        }
    };
    let failed = results.iter().filter(|r| !r.success).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            match (&result.data, &result.error) {
                (Some(path), _) => println!("{}", path),
                (None, Some(error)) => eprintln!("{} {}", "✗".red(), error),
                (None, None) => {}
            }
        }
    }

    if failed > 0 {
        exit(1);
    }
    Ok(())
}

fn generate<G: IdGenerator>(
    generator: &UploadPathGenerator<G>,
    names: &[String],
) -> Vec<OperationResult<String>> {
    names
        .iter()
        .map(|name| {
            OperationResult::from(generator.path_for(&(), name))
                .with_context("filename", name.as_str().into())
        })
        .collect()
}
