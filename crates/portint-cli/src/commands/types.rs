//! List the integer type catalog.

use std::fmt::Write;

use portint_core::IntType;

pub struct TypesArgs {
    pub json: bool,
}

#[derive(serde::Serialize)]
struct TypeInfo {
    name: IntType,
    signed: bool,
    bits: u32,
    min: i64,
    max: u64,
}

impl From<IntType> for TypeInfo {
    fn from(ty: IntType) -> Self {
        // Every catalog range fits these.
        Self {
            name: ty,
            signed: ty.is_signed(),
            bits: ty.bits(),
            min: ty.min() as i64,
            max: ty.max() as u64,
        }
    }
}

pub fn run(args: TypesArgs) {
    if args.json {
        let catalog: Vec<TypeInfo> = IntType::ALL.into_iter().map(TypeInfo::from).collect();
        match serde_json::to_string(&catalog) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", format_catalog());
}

pub fn format_catalog() -> String {
    let mut out = String::new();
    writeln!(out, "{:<5}{:>5}  {:>20}  {:>20}", "type", "bits", "min", "max")
        .expect("String write never fails");
    for ty in IntType::ALL {
        writeln!(out, "{:<5}{:>5}  {:>20}  {:>20}", ty.name(), ty.bits(), ty.min(), ty.max())
            .expect("String write never fails");
    }
    out
}
