//! Post-scan resolution: drain every capture slot through its resolver in
//! registration order, applying required/default policy. Fails on the first
//! unsatisfiable spec so error output is deterministic.

use std::any::Any;

use crate::error::ParseError;
use crate::help::HelpMetadata;
use crate::spec::{OptionSpec, PositionalSpec, SlotError, Spec};

pub(crate) fn resolve(
    specs: Vec<Spec>,
    help: &HelpMetadata,
) -> Result<Vec<Option<Box<dyn Any>>>, ParseError> {
    specs
        .into_iter()
        .map(|spec| match spec {
            Spec::Switch(switch) => Ok(Some(Box::new(switch.present) as Box<dyn Any>)),
            Spec::Option(OptionSpec {
                name,
                raw_value,
                resolver,
                ..
            }) => resolver(raw_value).map(Some).map_err(|err| match err {
                SlotError::Missing => ParseError::RequiredFlagNotGiven(format!(
                    "option --{name} requires a value but wasn't given one\n{}",
                    help.flag_help(&name)
                )),
                SlotError::Coerce { raw, source } => ParseError::InvalidInput(format!(
                    "{source}\ncouldn't parse input of --{name}, was given {raw}\n{}",
                    help.flag_help(&name)
                )),
            }),
            Spec::Positional(PositionalSpec {
                label,
                raw_value,
                resolver,
            }) => resolver(raw_value).map(Some).map_err(|err| match err {
                SlotError::Missing => {
                    ParseError::RequiredFlagNotGiven(format!("argument {{{label}}} not given"))
                }
                SlotError::Coerce { raw, source } => ParseError::InvalidInput(format!(
                    "{source}\ncouldn't parse input of {{{label}}}, was given {raw}"
                )),
            }),
        })
        .collect()
}
