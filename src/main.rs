// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::process::ExitCode;

use serde_json::{json, Map, Value};

use sanidate::{check_with, ConstraintSpec, Datum, FieldSchema, Registry, Schema};

/// The signup-form schema the demo checks records against.
fn demo_schema() -> Schema {
    Schema::new()
        .field("name", "required")
        .field(
            "email",
            FieldSchema::new().then("required").then("email"),
        )
        .field(
            "emailconfirm",
            ConstraintSpec::derive("email", |v, o| {
                if v == o {
                    Datum::Value(v.clone())
                } else {
                    Datum::Invalid
                }
            }),
        )
        .field(
            "age",
            FieldSchema::new()
                .then("required")
                .then("integer")
                .then(ConstraintSpec::with_args("min", vec![json!(18), json!(true)])),
        )
        .field("phone", "phone")
        .field("zip", "zip")
        .field("joined", "date")
        .field(
            "newsletter",
            FieldSchema::new()
                .then(ConstraintSpec::with_args("optional", vec![json!("no")]))
                .then("isTrue"),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sanidate=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} '<record as JSON object>'", args[0]);
        eprintln!(
            "Example: {} '{{\"name\":\"Ada\",\"email\":\"ada@example.com\",\"emailconfirm\":\"ada@example.com\",\"age\":\"36\",\"phone\":\"1-555-123-4567\",\"zip\":\"10001\",\"joined\":\"01/15/2024\"}}'",
            args[0]
        );
        return ExitCode::FAILURE;
    }

    let record: Map<String, Value> = match serde_json::from_str(&args[1]) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            eprintln!("record must be a JSON object");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("record is not valid JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = Registry::with_builtins();
    let result = match check_with(&registry, &record, &demo_schema(), true).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("schema configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("cleaned: {}", Value::Object(result.cleaned.clone()));
    match &result.report {
        None => {
            println!("report:  all fields passed");
            ExitCode::SUCCESS
        }
        Some(report) => {
            println!(
                "report:  {} field(s) failed",
                report.count
            );
            for (field, constraint) in &report.errors {
                println!("  {} failed '{}'", field, constraint);
            }
            ExitCode::FAILURE
        }
    }
}
