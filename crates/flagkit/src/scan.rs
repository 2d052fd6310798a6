//! Single-pass token scanner.
//!
//! Walks the raw argument vector left to right and fills the capture slots of
//! the registered specs: options are tried first, then switches, then the
//! token falls through to positional assignment. Malformed values are never
//! an error here; resolution reports them with full flag context.

use crate::spec::Spec;

/// Scan `args` into the capture slots of `specs`.
///
/// Returns the tokens that matched no flag and found no unfilled positional.
pub(crate) fn scan(specs: &mut [Spec], args: &[String]) -> Vec<String> {
    let mut rest = Vec::new();
    let mut idx = 0;

    while idx < args.len() {
        let token = &args[idx];

        if let Some((spec_idx, chr_idx)) = option_match(specs, token) {
            if chr_idx >= token.len() {
                // `--name value`: the next token carries the value. A dangling
                // `--name` at the end of the line leaves the slot empty and
                // resolution decides whether that is an error.
                if let Some(value) = args.get(idx + 1) {
                    set_option(specs, spec_idx, value.clone());
                    idx += 1;
                }
            } else if token[chr_idx..].starts_with('=') {
                set_option(specs, spec_idx, token[chr_idx + 1..].to_string());
            } else {
                // Attached form, e.g. `-xVALUE`.
                set_option(specs, spec_idx, token[chr_idx..].to_string());
            }
            idx += 1;
            continue;
        }

        if switch_match(specs, token) {
            idx += 1;
            continue;
        }

        if !fill_positional(specs, token) {
            tracing::warn!("token {token:?} matched no flag and no open positional");
            rest.push(token.clone());
        }
        idx += 1;
    }

    rest
}

/// First option whose long or short prefix matches, in registration order.
///
/// Returns the spec index and the position right after the matched prefix.
fn option_match(specs: &[Spec], token: &str) -> Option<(usize, usize)> {
    for (spec_idx, spec) in specs.iter().enumerate() {
        let Spec::Option(option) = spec else { continue };
        if token.starts_with("--") && token[2..].starts_with(option.name.as_str()) {
            return Some((spec_idx, option.name.len() + 2));
        }
        if let Some(short) = option.short_name {
            if token.starts_with('-') && token[1..].starts_with(short) {
                return Some((spec_idx, 1 + short.len_utf8()));
            }
        }
    }
    None
}

fn set_option(specs: &mut [Spec], spec_idx: usize, value: String) {
    if let Spec::Option(option) = &mut specs[spec_idx] {
        tracing::trace!("captured {value:?} for --{}", option.name);
        option.raw_value = Some(value);
    }
}

/// Mark every switch the token turns on; short forms combine (`-abc`).
///
/// Returns whether at least one switch matched.
fn switch_match(specs: &mut [Spec], token: &str) -> bool {
    let mut any = false;
    for spec in specs.iter_mut() {
        let Spec::Switch(switch) = spec else { continue };
        let long = token.starts_with("--") && token[2..].starts_with(switch.name.as_str());
        let short = switch
            .short_name
            .is_some_and(|c| token.starts_with('-') && token[1..].contains(c));
        if long || short {
            switch.present = true;
            any = true;
        }
    }
    any
}

/// Assign the token to the first unfilled positional, in registration order.
fn fill_positional(specs: &mut [Spec], token: &str) -> bool {
    for spec in specs.iter_mut() {
        if let Spec::Positional(positional) = spec {
            if positional.raw_value.is_none() {
                positional.raw_value = Some(token.to_string());
                return true;
            }
        }
    }
    false
}
