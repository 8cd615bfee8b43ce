use std::env;
use std::process;

use rust_fscript::{create_global_record, Context, PlainData};

fn main() {
    #[cfg(feature = "env_logger")]
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 4 || args[1] != "-g" {
        eprintln!("Usage: {} -g '<json object>' name...", args[0]);
        process::exit(1);
    }

    let globals = match serde_json::from_str::<serde_json::Value>(&args[2]).map(PlainData::from) {
        Ok(PlainData::Object(entries)) => entries,
        Ok(_) => {
            eprintln!("Globals must be a JSON object");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("Invalid JSON: {err}");
            process::exit(1);
        }
    };

    let context = Context::new(create_global_record(&globals));
    let mut failed = false;
    for name in &args[3..] {
        match context.get(name, None).and_then(|value| value.to_plain_data()) {
            Ok(data) => println!("{name} = {}", data.to_json()),
            Err(err) => {
                eprintln!("{name}: {err}");
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}
