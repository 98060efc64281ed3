//! Generate the list of primary Azure resource types.
//!
//! The pipeline is strictly sequential: resolve a subscription, enumerate
//! every resource type from the registered providers, filter them through a
//! [`FilterPolicy`], and write the result as JSON.

pub mod azure;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;

pub use azure::providers::{enumerate_resource_types, ProviderRecord, ProviderSource};
pub use error::GeneratorError;
pub use filter::{FilterOutcome, FilterPolicy};

use std::path::Path;

/// Enumerate, filter and persist. Progress lines go to stdout.
pub async fn generate<S: ProviderSource + ?Sized>(
    source: &S,
    policy: &FilterPolicy,
    output_path: &Path,
) -> Result<FilterOutcome, GeneratorError> {
    println!("Fetching all Azure resource types...");
    let all_types = enumerate_resource_types(source)
        .await
        .map_err(|e| GeneratorError::enumeration(&e))?;
    println!("Found {} total resource types", all_types.len());

    println!("Filtering for primary resource types...");
    let outcome = policy.apply(&all_types);
    println!(
        "Found {} exact matches from primary patterns",
        outcome.exact_matches
    );
    println!(
        "Added {} additional resource types from pattern matching",
        outcome.pattern_matches
    );
    println!(
        "Total filtered to {} primary resource types",
        outcome.types.len()
    );

    println!("Saving to {}...", output_path.display());
    output::save_to_json(&outcome.types, output_path)
        .map_err(|e| GeneratorError::write(output_path, &e))?;
    println!(
        "Successfully saved {} resource types to {}",
        outcome.types.len(),
        output_path.display()
    );

    Ok(outcome)
}
