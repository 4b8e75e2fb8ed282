use std::fs;
use std::str::FromStr;

use clap::ArgMatches;
use log::info;
use serde::Serialize;

use crate::color::{ColoringInstance, Graph};
use crate::compact_instance::CompactInstance;
use crate::dimacs;
use crate::error::{ColoringError, Result};

/** reads a graph file, either "json" (serialized `Graph`) or "dimacs" */
pub fn read_graph(filename:&str, instance_type:&str) -> Result<Graph> {
    let graph = match instance_type {
        "json" => serde_json::from_str(&fs::read_to_string(filename)?)?,
        "dimacs" => dimacs::read_from_file(filename)?,
        _ => return Err(ColoringError::Unknown { kind: "instance type", name: instance_type.to_string() }),
    };
    CompactInstance::from_graph(&graph)?.display_statistics();
    Ok(graph)
}

/** reads an optional command line value */
pub fn parse_arg<T:FromStr>(main_args:&ArgMatches, name:&str) -> Result<Option<T>>
where T::Err: std::fmt::Display {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|e| ColoringError::Parse {
            message: format!("invalid value for --{} ({}): {}", name, s, e)
        }),
    }
}

/** writes a value as JSON in the file (if any) */
pub fn export_json<T:Serialize>(filename:Option<&str>, value:&T) -> Result<()> {
    if let Some(filename) = filename {
        fs::write(filename, serde_json::to_string_pretty(value)?)?;
        info!("written: {}", filename);
    }
    Ok(())
}
