//! The fixed, read‑only table of predefined callables that sits at the root
//! of every scope chain.

use log::info;
use phf::phf_map;

use crate::error::{Result, SimplError};
use crate::interpreter::Interpreter;
use crate::value::{NativeFn, Value};

/// Requests a built‑in makes of the host.  The interpreter queues them and
/// the terminal drains the queue after each submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Clear the screen and the scrollback.
    ClearScreen,
}

static NATIVES: phf::Map<&'static str, NativeFn> = phf_map! {
    "abs" => abs as NativeFn,
    "cls" => cls as NativeFn,
};

/// Read‑only view over the built‑ins, mirroring the lookup half of a scope.
pub struct Builtins;

/// The root of every scope chain.
pub static BUILTINS: Builtins = Builtins;

impl Builtins {
    pub fn get(&self, name: &str) -> Option<Value> {
        NATIVES.get_entry(name).map(|(name, func)| Value::NativeFunction {
            name: *name,
            func: *func,
        })
    }
}

fn abs(_interp: &mut Interpreter, args: &[Value]) -> Result<Value> {
    let n: i64 = args
        .first()
        .ok_or(SimplError::MissingArgument { function: "abs" })?
        .to_number()?;

    n.checked_abs()
        .map(Value::Number)
        .ok_or(SimplError::Overflow)
}

fn cls(interp: &mut Interpreter, _args: &[Value]) -> Result<Value> {
    info!("cls() requested a screen clear");

    interp.raise(Signal::ClearScreen);

    Ok(Value::Null)
}
