//! Lowered programs: a flat instruction list over an operand stack.
//!
//! The compiler emits one instruction per evaluator call, so a program is a
//! readable record of exactly which conversions and operations run, in
//! program order.

use std::fmt::{self, Write};

use crate::{BinOp, CmpOp, Colors, Conversion, IntType, ShiftOp, Value};

/// Index of a `let` binding.
pub type LocalId = u16;

/// A program holds at most `LocalId::MAX + 1` locals.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
#[error("too many locals: a program holds at most {} slots", LocalId::MAX as u32 + 1)]
pub struct TooManyLocals;

/// Static type of an expression.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Ty {
    Int(IntType),
    /// Result of a comparison.
    Bool,
}

impl Ty {
    pub fn as_int(self) -> Option<IntType> {
        match self {
            Self::Int(ty) => Some(ty),
            Self::Bool => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(ty) => write!(f, "{ty}"),
            Self::Bool => f.write_str("bool"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instr {
    /// Push a constant.
    Push(Value),
    /// Push the value bound to a local.
    Load(LocalId),
    /// Pop into a local.
    Store(LocalId),
    /// Pop rhs, pop lhs, push `lhs op rhs`.
    Binary(BinOp),
    /// Pop amount, pop operand, push the shifted operand.
    Shift(ShiftOp),
    /// Pop, convert to the target type, push.
    Convert(Conversion, IntType),
    /// Pop rhs, pop lhs, push a boolean.
    Compare(CmpOp),
}

impl Instr {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Push(_) => "push",
            Self::Load(_) => "load",
            Self::Store(_) => "store",
            Self::Binary(BinOp::Add) => "add",
            Self::Binary(BinOp::Sub) => "sub",
            Self::Binary(BinOp::Mul) => "mul",
            Self::Binary(BinOp::Div) => "div",
            Self::Binary(BinOp::Rem) => "rem",
            Self::Shift(ShiftOp::Shl) => "shl",
            Self::Shift(ShiftOp::Shr) => "shr",
            Self::Shift(ShiftOp::WrapShl) => "wrap_shl",
            Self::Convert(Conversion::Widen, _) => "widen",
            Self::Convert(Conversion::Narrow, _) => "narrow",
            Self::Convert(Conversion::Saturate, _) => "sat",
            Self::Convert(Conversion::Wrap, _) => "wrap",
            Self::Convert(Conversion::Reinterpret, _) => "reinterp",
            Self::Compare(CmpOp::Lt) => "lt",
            Self::Compare(CmpOp::Le) => "le",
            Self::Compare(CmpOp::Gt) => "gt",
            Self::Compare(CmpOp::Ge) => "ge",
            Self::Compare(CmpOp::Eq) => "eq",
            Self::Compare(CmpOp::Ne) => "ne",
        }
    }
}

/// A `let` slot and the type it was declared with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Local {
    pub name: String,
    pub ty: Ty,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instrs: Vec<Instr>,
    locals: Vec<Local>,
    result: Option<Ty>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction, returning its address.
    pub fn push(&mut self, instr: Instr) -> usize {
        self.instrs.push(instr);
        self.instrs.len() - 1
    }

    /// Register a new local slot. Shadowing a name allocates a fresh slot.
    pub fn add_local(&mut self, name: &str, ty: Ty) -> Result<LocalId, TooManyLocals> {
        let id = LocalId::try_from(self.locals.len()).map_err(|_| TooManyLocals)?;
        self.locals.push(Local {
            name: name.to_owned(),
            ty,
        });
        Ok(id)
    }

    pub fn set_result(&mut self, ty: Option<Ty>) {
        self.result = ty;
    }

    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    pub fn locals(&self) -> &[Local] {
        &self.locals
    }

    pub fn local(&self, id: LocalId) -> Option<&Local> {
        self.locals.get(id as usize)
    }

    pub fn local_name(&self, id: LocalId) -> Option<&str> {
        self.local(id).map(|l| l.name.as_str())
    }

    /// Type of the final expression, `None` for a program of bindings only.
    pub fn result(&self) -> Option<Ty> {
        self.result
    }

    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    /// Operand column for the listing.
    pub fn operand_text(&self, instr: &Instr) -> String {
        match instr {
            Instr::Push(v) => v.to_string(),
            Instr::Load(id) | Instr::Store(id) => {
                self.local_name(*id).map_or_else(|| format!("#{id}"), str::to_owned)
            }
            Instr::Convert(_, ty) => ty.to_string(),
            Instr::Binary(_) | Instr::Shift(_) | Instr::Compare(_) => String::new(),
        }
    }

    /// Human-readable listing.
    pub fn dump(&self, c: Colors) -> String {
        let mut out = String::new();
        self.format(&mut out, c).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut impl Write, c: Colors) -> fmt::Result {
        if !self.locals.is_empty() {
            let locals: Vec<_> = self
                .locals
                .iter()
                .map(|l| format!("{}: {}", l.name, l.ty))
                .collect();
            writeln!(w, "{}locals:{} {}", c.dim, c.reset, locals.join(", "))?;
        }
        let result = self.result.map_or_else(|| "-".to_owned(), |ty| ty.to_string());
        writeln!(w, "{}result:{} {result}", c.dim, c.reset)?;
        w.write_char('\n')?;

        for (ip, instr) in self.instrs.iter().enumerate() {
            let mnemonic = format!("{:<8}", instr.mnemonic());
            let operand = self.operand_text(instr);
            let line = format!(
                "{}{ip:>3}{}  {}{mnemonic}{} {}{operand}{}",
                c.dim, c.reset, c.blue, c.reset, c.green, c.reset
            );
            writeln!(w, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
