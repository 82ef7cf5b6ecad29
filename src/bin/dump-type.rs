use activator_cli::fixtures;
use activator_types::{members::ConstructorDescription, TypeResolver};
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Dump the fields and constructors of a fixture type"
)]
struct Args {
    /// The full name of the type to dump (e.g. Fixtures.MultiCtor)
    type_name: String,
}

fn describe_constructor(ctor: &ConstructorDescription) -> String {
    let def = ctor.definition();
    let params = def
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    let visibility = if def.is_public() { "public" } else { "non-public" };
    format!("{} .ctor({})", visibility, params)
}

fn main() -> ExitCode {
    activator_cli::init_tracing();
    let args = Args::parse();
    let registry = fixtures::registry();

    let td = match registry.locate_type(&args.type_name) {
        Ok(td) => td,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Available types:");
            for name in registry.type_names() {
                eprintln!("  {}", name);
            }
            return ExitCode::from(1);
        }
    };

    let def = td.definition();
    let kind = if td.is_value_type() { "value type" } else { "class" };
    let modifier = if td.is_abstract() { "abstract " } else { "" };
    println!("{}{} {}", modifier, kind, td.type_name());
    if let Some(base) = &def.extends {
        println!("  extends {}", base.type_name());
    }

    println!("Fields:");
    for field in &def.fields {
        println!("  {} {}", field.ty, field.name);
    }

    println!("Constructors:");
    for ctor in td.constructors() {
        println!("  {}", describe_constructor(&ctor));
    }
    ExitCode::SUCCESS
}
