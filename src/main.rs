//! Command that prints a new UUID or decodes an existing one

use std::{env, io, io::BufRead, io::Write, process::ExitCode};

use uuidnext::{Database, Uuid};

const USAGE: &str = "\
Usage: uuidnext <command> [option]

Commands:
    random             Create a new UUID v4
    sequential         Create a new UUID v7
    database [dbName]  Create a UUID to be used as a database primary key (v7 or v8 depending on
                       the database); dbName can be \"PostgreSQL\", \"SqlServer\", \"SQLite\" or
                       \"Other\"
    decode [uuid]      Decode the version of a UUID and, for v1, v6, v7 and v8, its timestamp and
                       sequence; reads one line from standard input if uuid is omitted
    version            Show the version";

fn main() -> io::Result<ExitCode> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    };

    match respond(&command, args.next(), io::stdin().lock()) {
        Ok(output) => {
            writeln!(io::stdout(), "{output}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            writeln!(io::stderr(), "{message}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Runs `command` and returns the text to print or the error message.
fn respond(command: &str, option: Option<String>, stdin: impl BufRead) -> Result<String, String> {
    log::debug!("running command '{command}' with option {option:?}");
    match command.to_ascii_lowercase().as_str() {
        "random" => Ok(uuidnext::new_random().to_string()),
        "sequential" => Ok(uuidnext::new_sequential().to_string()),
        "database" => {
            let database: Database = option
                .as_deref()
                .unwrap_or_default()
                .parse()
                .map_err(|err| format!("{err}"))?;
            Ok(uuidnext::new_database_friendly(database).to_string())
        }
        "decode" => {
            let src = match option {
                Some(src) => src,
                None => read_line(stdin).map_err(|err| format!("Error: {err}"))?,
            };
            let Ok(uuid) = Uuid::try_parse(&src) else {
                return Err(format!("The string [{src}] is not a valid UUID"));
            };
            Ok(uuidnext::decode(&uuid).to_string())
        }
        "version" => Ok(env!("CARGO_PKG_VERSION").to_owned()),
        _ => Err(format!("Unknown command [{command}]\n\n{USAGE}")),
    }
}

fn read_line(mut stdin: impl BufRead) -> io::Result<String> {
    let mut buf = String::new();
    stdin.read_line(&mut buf)?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_owned())
}
