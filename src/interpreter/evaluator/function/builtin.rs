use std::collections::HashMap;

use crate::interpreter::evaluator::{
    core::Context,
    function::{
        console,
        core::{BuiltinFn, Function},
        math, system,
    },
};

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the parameter names (informational; never enforced),
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table used to seed every context),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:literal),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:   &'static str,
            params: &'static [&'static str],
            func:   BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "write"       => { params: [], func: console::write },
    "writeln"     => { params: [], func: console::writeln },
    "prompt"      => { params: ["prompt", "variableName", "davType"], func: console::prompt },
    "sys_clear"   => { params: [], func: console::sys_clear },
    "length"      => { params: ["x"], func: system::length },
    "get_type"    => { params: ["name"], func: system::get_type },
    "sys_exit"    => { params: [], func: system::sys_exit },
    "sys_delete"  => { params: ["variableName"], func: system::sys_delete },
    "__sqrt"      => { params: ["x"], func: math::sqrt },
    "__abs"       => { params: ["x"], func: math::abs },
    "__round"     => { params: ["x"], func: math::round },
    "__ceil"      => { params: ["x"], func: math::ceil },
    "__floor"     => { params: ["x"], func: math::floor },
    "__pow"       => { params: ["base", "exponent"], func: math::pow },
    "__log"       => { params: ["x"], func: math::log },
    "__log2"      => { params: ["x"], func: math::log2 },
    "__log10"     => { params: ["x"], func: math::log10 },
    "__sin"       => { params: ["x"], func: math::sin },
    "__cos"       => { params: ["x"], func: math::cos },
    "__tan"       => { params: ["x"], func: math::tan },
    "__atan"      => { params: ["x"], func: math::atan },
    "__acos"      => { params: ["x"], func: math::acos },
    "__asin"      => { params: ["x"], func: math::asin },
    "__exp"       => { params: ["x"], func: math::exp },
    "__max"       => { params: ["a", "b"], func: math::max },
    "__min"       => { params: ["a", "b"], func: math::min },
    "__rand"      => { params: ["min", "max"], func: math::rand },
    "__randInt"   => { params: ["min", "max"], func: math::rand_int },
    "__randFloat" => { params: ["min", "max"], func: math::rand },
    "__isNaN"     => { params: ["x"], func: math::is_nan },
    "__isFinite"  => { params: ["x"], func: math::is_finite },
}

impl Context {
    /// Builds the function table every program starts with: one
    /// [`Function::Builtin`] per entry of the builtin table.
    ///
    /// # Example
    /// ```
    /// use dav::interpreter::evaluator::{core::Context, function::builtin::BUILTIN_FUNCTIONS};
    ///
    /// let context = Context::new();
    ///
    /// assert!(BUILTIN_FUNCTIONS.iter().all(|name| context.has_function(name)));
    /// ```
    #[must_use]
    pub fn builtin_functions() -> HashMap<String, Function> {
        BUILTIN_TABLE.iter()
                     .map(|def| {
                         (def.name.to_string(),
                          Function::Builtin { name:   def.name,
                                             params: def.params,
                                             func:   def.func, })
                     })
                     .collect()
    }
}
