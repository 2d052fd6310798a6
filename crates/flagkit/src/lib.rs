//! Declarative command-line flag parsing with typed coercion and aligned
//! help rendering.
//!
//! Callers register options (named, value-carrying), switches (named boolean
//! presence flags) and positionals (ordered, required), then run a single
//! [`Flags::parse`] pass over the argument vector. Registration hands back a
//! typed id per flag; after a successful parse each id is exchanged for its
//! final value, so a heterogeneous flag set stays statically typed end to
//! end without the registry itself being generic.
//!
//! Recognized syntaxes: `--name value`, `--name=value`, `-x value`,
//! `-xvalue`, `--name`, `-x`, and combined short switches `-xyz`. Tokens
//! that match nothing fill positional slots in registration order; whatever
//! is left over is kept on [`Matches::rest`].
//!
//! ```
//! use flagkit::Flags;
//!
//! let mut flags = Flags::with_args(
//!     "player",
//!     vec!["--fps=24".to_string(), "-m".to_string(), "intro.mp4".to_string()],
//! );
//! flags.name("player").version("0.1.0");
//!
//! let fps = flags.option_required::<u32>("fps", Some('f'), "playback rate", Some(30));
//! let mute = flags.flag("mute", Some('m'), "disable audio");
//! let input = flags.positional::<String>("input");
//!
//! let mut matches = flags.parse()?;
//! assert_eq!(matches.take(fps), 24);
//! assert!(matches.take(mute));
//! assert_eq!(matches.take(input), "intro.mp4");
//! # Ok::<(), flagkit::ParseError>(())
//! ```

mod coerce;
mod error;
mod help;
mod resolve;
mod scan;
mod spec;

use std::any::Any;
use std::collections::HashSet;
use std::io::Write;
use std::marker::PhantomData;

use crate::help::{HelpMetadata, OptionHelp, PositionalHelp, SwitchHelp};
use crate::spec::{OptionSpec, PositionalSpec, Resolver, SlotError, Spec, SwitchSpec};

pub use crate::coerce::{CoerceError, FromArg};
pub use crate::error::ParseError;
pub use crate::spec::{ArgId, OptionId, PositionalId, RequiredId, SwitchId};

/// Flag registration and the parse entry point.
///
/// One `Flags` value owns one argument vector and one spec registry, and is
/// consumed by [`parse`](Self::parse); rebuilding it per invocation keeps
/// capture slots from leaking between parses.
///
/// Long names match as `--name` prefixes and short names as `-x` prefixes,
/// first registered match wins; exact duplicates are rejected up front, but
/// one name that prefixes another (`--port` vs `--portal`) is resolved by
/// registration order.
pub struct Flags {
    args: Vec<String>,
    specs: Vec<Spec>,
    help: HelpMetadata,
}

impl Flags {
    /// Capture the process arguments; the first names the executable.
    pub fn from_env() -> Self {
        let mut args = std::env::args();
        let executable = args.next().unwrap_or_default();
        Self::with_args(executable, args.collect())
    }

    /// Build a parser over an explicit argument vector.
    pub fn with_args(executable: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            args,
            specs: Vec::new(),
            help: HelpMetadata {
                executable: executable.into(),
                ..Default::default()
            },
        }
    }

    /// Program name shown in the help header.
    pub fn name(&mut self, name: &str) -> &mut Self {
        self.help.name = name.to_string();
        self
    }

    /// Program version shown in the help header.
    pub fn version(&mut self, version: &str) -> &mut Self {
        self.help.version = version.to_string();
        self
    }

    /// Register an optional value-carrying flag; resolves to `Option<T>`.
    pub fn option<T: FromArg + 'static>(
        &mut self,
        name: &str,
        short_name: Option<char>,
        help: &str,
    ) -> OptionId<T> {
        self.help.options.push(OptionHelp {
            name: name.to_string(),
            short_name,
            help: help.to_string(),
            default_text: None,
        });
        let resolver: Resolver = Box::new(|raw| match raw {
            None => Ok(Box::new(None::<T>) as Box<dyn Any>),
            Some(raw) => match T::from_arg(&raw) {
                Ok(value) => Ok(Box::new(Some(value))),
                Err(source) => Err(SlotError::Coerce { raw, source }),
            },
        });
        let index = self.push_spec(Spec::Option(OptionSpec {
            name: name.to_string(),
            short_name,
            raw_value: None,
            resolver,
        }));
        OptionId {
            index,
            _marker: PhantomData,
        }
    }

    /// Register a required value-carrying flag; resolves to `T`.
    ///
    /// A `default` makes the flag satisfiable without input: the value is
    /// returned as registered, never round-tripped through coercion, and an
    /// explicit token always beats it.
    pub fn option_required<T: FromArg + 'static>(
        &mut self,
        name: &str,
        short_name: Option<char>,
        help: &str,
        default: Option<T>,
    ) -> RequiredId<T> {
        self.help.options.push(OptionHelp {
            name: name.to_string(),
            short_name,
            help: help.to_string(),
            default_text: default.as_ref().map(|value| value.display_text()),
        });
        let resolver: Resolver = Box::new(move |raw| match raw {
            Some(raw) => match T::from_arg(&raw) {
                Ok(value) => Ok(Box::new(value) as Box<dyn Any>),
                Err(source) => Err(SlotError::Coerce { raw, source }),
            },
            None => match default {
                Some(value) => Ok(Box::new(value)),
                None => Err(SlotError::Missing),
            },
        });
        let index = self.push_spec(Spec::Option(OptionSpec {
            name: name.to_string(),
            short_name,
            raw_value: None,
            resolver,
        }));
        RequiredId {
            index,
            _marker: PhantomData,
        }
    }

    /// Register a boolean switch; resolves to `bool`.
    ///
    /// Short forms combine: `-xyz` turns on every switch whose short
    /// character appears after the dash.
    pub fn flag(&mut self, name: &str, short_name: Option<char>, help: &str) -> SwitchId {
        self.help.switches.push(SwitchHelp {
            name: name.to_string(),
            short_name,
            help: help.to_string(),
        });
        let index = self.push_spec(Spec::Switch(SwitchSpec {
            name: name.to_string(),
            short_name,
            present: false,
        }));
        SwitchId { index }
    }

    /// Register a positional argument; resolves to `T`.
    ///
    /// Positionals fill in registration order from the tokens no flag
    /// claimed, and every one of them must end up filled.
    pub fn positional<T: FromArg + 'static>(&mut self, label: &str) -> PositionalId<T> {
        self.help.positionals.push(PositionalHelp {
            label: label.to_string(),
        });
        let resolver: Resolver = Box::new(|raw| match raw {
            None => Err(SlotError::Missing),
            Some(raw) => match T::from_arg(&raw) {
                Ok(value) => Ok(Box::new(value) as Box<dyn Any>),
                Err(source) => Err(SlotError::Coerce { raw, source }),
            },
        });
        let index = self.push_spec(Spec::Positional(PositionalSpec {
            label: label.to_string(),
            raw_value: None,
            resolver,
        }));
        PositionalId {
            index,
            _marker: PhantomData,
        }
    }

    /// Scan the argument vector and resolve every registered spec.
    ///
    /// All-or-nothing: on the first unsatisfiable spec (in registration
    /// order) the usage line and a colorized error are written to stderr and
    /// the error is returned; no partial results survive.
    pub fn parse(mut self) -> Result<Matches, ParseError> {
        tracing::debug!(
            "parsing {} tokens against {} registered specs",
            self.args.len(),
            self.specs.len()
        );
        self.check_duplicates()?;

        let rest = scan::scan(&mut self.specs, &self.args);

        match resolve::resolve(self.specs, &self.help) {
            Ok(slots) => Ok(Matches { slots, rest }),
            Err(err) => {
                let mut stderr = std::io::stderr().lock();
                let _ = writeln!(stderr, "{}\n", self.help.usage_line());
                let _ = writeln!(stderr, "\x1b[1;31m\x1b[4merror:\x1b[0m {err}");
                Err(err)
            }
        }
    }

    /// Render the full help text to stdout.
    pub fn print_help(&self) {
        print!("{}", self.help_text());
    }

    /// The full help text: version header, usage line, flag tables.
    pub fn help_text(&self) -> String {
        self.help.render_help()
    }

    /// The one-line usage summary for the registered positionals.
    pub fn usage_line(&self) -> String {
        self.help.usage_line()
    }

    fn push_spec(&mut self, spec: Spec) -> usize {
        self.specs.push(spec);
        self.specs.len() - 1
    }

    /// Reject exact duplicate long names or short characters across options
    /// and switches before any token is consumed.
    fn check_duplicates(&self) -> Result<(), ParseError> {
        let mut longs = HashSet::new();
        let mut shorts = HashSet::new();
        for spec in &self.specs {
            let (name, short_name) = match spec {
                Spec::Option(option) => (&option.name, option.short_name),
                Spec::Switch(switch) => (&switch.name, switch.short_name),
                Spec::Positional(_) => continue,
            };
            if !longs.insert(name.clone()) {
                return Err(ParseError::DuplicateName(format!(
                    "flag --{name} registered twice"
                )));
            }
            if let Some(short) = short_name {
                if !shorts.insert(short) {
                    return Err(ParseError::DuplicateName(format!(
                        "short flag -{short} registered twice"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The resolved result set of one parse invocation.
///
/// Values are stored per registration slot; exchange each id for its value
/// with [`take`](Self::take). Ids are moved in, so every slot can be taken
/// only once.
pub struct Matches {
    slots: Vec<Option<Box<dyn Any>>>,
    rest: Vec<String>,
}

impl Matches {
    /// Exchange a registration id for the value it resolved to.
    ///
    /// # Panics
    ///
    /// Panics when `id` was issued by a different `Flags` value than the one
    /// that produced this result.
    pub fn take<I: ArgId>(&mut self, id: I) -> I::Output {
        let slot = self
            .slots
            .get_mut(id.index())
            .and_then(|slot| slot.take())
            .expect("argument id does not belong to this parse result");
        *slot
            .downcast::<I::Output>()
            .unwrap_or_else(|_| panic!("argument id does not match the value stored for it"))
    }

    /// Tokens that matched no flag and found no unfilled positional.
    pub fn rest(&self) -> &[String] {
        self.rest.as_slice()
    }
}
