use ahash::AHashSet;
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use schema_fuse::schema::{PrimitiveType, SchemaDocument, VariableDefinition};
use serde_json::{Map, Value, json};
use std::fs;

const GROUPS: [&str; 4] = ["demographics", "history", "labs", "treatment"];

const UNMATCHED_KEYS: [&str; 7] = [
    "correction",
    "standardized",
    "filled_blank",
    "improved_comment",
    "missing_docs",
    "contradictions",
    "questioned",
];

/// A CLI tool to generate a definition schema and a matching performance dataset
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated definition schema to
    #[arg(long, default_value = "generated_definitions.json")]
    definitions: String,

    /// The path to write the generated performance dataset to
    #[arg(long, default_value = "generated_performance.json")]
    performance: String,

    /// Number of variables in the performance dataset
    #[arg(long, default_value_t = 50)]
    variables: usize,

    /// Number of subjects annotated per variable
    #[arg(long, default_value_t = 10)]
    subjects: usize,

    /// How many dataset variables to leave out of the definition schema
    #[arg(long, default_value_t = 5)]
    missing: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.missing > cli.variables {
        eprintln!(
            "Error: --missing ({}) cannot be greater than --variables ({})",
            cli.missing, cli.variables
        );
        std::process::exit(1);
    }

    println!(
        "Generating {} variables x {} subjects ({} left undefined)...",
        cli.variables, cli.subjects, cli.missing
    );

    let names: Vec<String> = (1..=cli.variables).map(|i| format!("var_{:03}", i)).collect();
    let undefined = pick_undefined(&mut rng, cli.variables, cli.missing);

    let definitions = SchemaDocument::from_definitions(
        names
            .iter()
            .enumerate()
            .filter(|(i, _)| !undefined.contains(i))
            .map(|(_, name)| (name.clone(), generate_definition(&mut rng, name))),
    );
    fs::write(&cli.definitions, definitions.to_pretty_json()?)?;
    println!(
        "-> Wrote {} definitions to '{}'",
        definitions.len(),
        cli.definitions
    );

    let performance: Map<String, Value> = names
        .iter()
        .map(|name| {
            let subjects: Map<String, Value> = (1..=cli.subjects)
                .map(|s| (format!("subject_{:03}", s), generate_annotation(&mut rng)))
                .collect();
            (name.clone(), json!({ "performance": subjects }))
        })
        .collect();
    fs::write(
        &cli.performance,
        serde_json::to_string_pretty(&Value::Object(performance))?,
    )?;
    println!(
        "-> Wrote {} performance entries to '{}'",
        names.len(),
        cli.performance
    );

    Ok(())
}

/// Picks `count` distinct variable indices to leave out of the schema.
fn pick_undefined(rng: &mut ThreadRng, total: usize, count: usize) -> AHashSet<usize> {
    let mut picked = AHashSet::with_capacity(count);
    while picked.len() < count {
        picked.insert(rng.random_range(0..total));
    }
    picked
}

fn generate_definition(rng: &mut ThreadRng, name: &str) -> VariableDefinition {
    let group = GROUPS[rng.random_range(0..GROUPS.len())];
    let (kind, options) = if rng.random_bool(0.3) {
        (
            PrimitiveType::String,
            Some(vec![json!("yes"), json!("no"), json!("unknown")]),
        )
    } else if rng.random_bool(0.5) {
        (PrimitiveType::Number, None)
    } else {
        (PrimitiveType::String, None)
    };

    VariableDefinition {
        type_union: vec![kind, PrimitiveType::Null],
        default: None,
        description: format!("Generated variable {}", name),
        group_id: group.to_string(),
        notes: String::new(),
        options,
        performance: None,
    }
}

/// A raw annotation in one of the dataset's three shapes.
fn generate_annotation(rng: &mut ThreadRng) -> Value {
    match rng.random_range(0..10) {
        0..=5 => json!({ "matched": true }),
        6 => json!({ "blank": true }),
        _ => {
            let flags: Map<String, Value> = UNMATCHED_KEYS
                .iter()
                .filter(|_| rng.random_bool(0.3))
                .map(|key| (key.to_string(), Value::Bool(true)))
                .collect();
            json!({ "unmatched": flags })
        }
    }
}
