//! Limb-machine emulation of generated code on a narrow native word.
//!
//! Generated code cannot assume any integer wider than the target's native
//! word, so every operation here runs on little-endian limbs of the native
//! width, in sign-magnitude form:
//! - addition and subtraction with carry and borrow chains
//! - schoolbook multiplication
//! - shift-subtract division
//! - limb shifts and limb-by-limb comparisons
//!
//! Range checks compare the exact magnitude against the working type's
//! bounds, so results, fallback values and the reported `ErrorKind` agree
//! with the simulation engine on every target width.

use std::cmp::Ordering;
use std::fmt;

use portint_core::{
    BinOp, BitWidth, Conversion, ErrorContext, ErrorKind, Fault, IntType, Misuse, OpKind,
    Operation, Output, ShiftOp, Value,
};

/// Word size of the emulated target.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum NativeWidth {
    W16 = 16,
    #[default]
    W32 = 32,
    W64 = 64,
}

impl NativeWidth {
    pub const ALL: [NativeWidth; 3] = [Self::W16, Self::W32, Self::W64];

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            _ => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn bit_width(self) -> BitWidth {
        match self {
            Self::W16 => BitWidth::W16,
            Self::W32 => BitWidth::W32,
            Self::W64 => BitWidth::W64,
        }
    }

    #[inline]
    const fn mask(self) -> u64 {
        self.bit_width().mask()
    }

    /// Limbs needed to hold a 64-bit operand.
    #[inline]
    const fn operand_limbs(self) -> usize {
        (u64::BITS / self.bits()) as usize
    }
}

impl fmt::Display for NativeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// A 128-bit product on a 16-bit word, plus one carry limb.
const MAX_LIMBS: usize = 9;

/// Unsigned magnitude as little-endian limbs. Words at `len` and above are zero.
#[derive(Clone, Copy, Debug)]
struct Limbs {
    width: NativeWidth,
    words: [u64; MAX_LIMBS],
    len: usize,
}

impl Limbs {
    fn new(width: NativeWidth) -> Self {
        Self {
            width,
            words: [0; MAX_LIMBS],
            len: 0,
        }
    }

    fn from_u64(width: NativeWidth, v: u64) -> Self {
        let mut out = Self::new(width);
        for i in 0..width.operand_limbs() {
            out.push((v >> (i as u32 * width.bits())) & width.mask());
        }
        out
    }

    fn one(width: NativeWidth) -> Self {
        Self::from_u64(width, 1)
    }

    #[inline]
    fn limb(&self, i: usize) -> u64 {
        if i < self.len { self.words[i] } else { 0 }
    }

    fn push(&mut self, word: u64) {
        self.words[self.len] = word;
        self.len += 1;
    }

    /// Change the limb count. Dropped limbs must already be zero.
    fn resized(mut self, len: usize) -> Self {
        for word in self.words.iter_mut().take(self.len).skip(len) {
            debug_assert_eq!(*word, 0);
            *word = 0;
        }
        self.len = len;
        self
    }

    fn is_zero(&self) -> bool {
        self.words[..self.len].iter().all(|&w| w == 0)
    }

    fn bit_len(&self) -> u32 {
        self.len as u32 * self.width.bits()
    }

    fn bit(&self, i: u32) -> bool {
        let w = self.width.bits();
        (self.limb((i / w) as usize) >> (i % w)) & 1 == 1
    }

    fn set_bit(&mut self, i: u32) {
        let w = self.width.bits();
        self.words[(i / w) as usize] |= 1 << (i % w);
    }

    fn compare(&self, rhs: &Self) -> Ordering {
        (0..self.len.max(rhs.len))
            .rev()
            .map(|i| self.limb(i).cmp(&rhs.limb(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    fn add(&self, rhs: &Self) -> Self {
        let w = self.width.bits();
        let mut out = Self::new(self.width);
        let mut carry = 0u128;
        for i in 0..self.len.max(rhs.len) {
            let sum = self.limb(i) as u128 + rhs.limb(i) as u128 + carry;
            out.push(sum as u64 & self.width.mask());
            carry = sum >> w;
        }
        out.push(carry as u64);
        out
    }

    /// `self - rhs`. Requires `self >= rhs`.
    fn sub(&self, rhs: &Self) -> Self {
        let base = 1u128 << self.width.bits();
        let mut out = Self::new(self.width);
        let mut borrow = 0u128;
        for i in 0..self.len.max(rhs.len) {
            let (a, b) = (self.limb(i) as u128, rhs.limb(i) as u128 + borrow);
            let (word, next) = if a >= b { (a - b, 0) } else { (a + base - b, 1) };
            out.push(word as u64);
            borrow = next;
        }
        debug_assert_eq!(borrow, 0);
        out
    }

    fn mul(&self, rhs: &Self) -> Self {
        let w = self.width.bits();
        let mut out = Self::new(self.width);
        out.len = self.len + rhs.len;
        for i in 0..self.len {
            let mut carry = 0u128;
            for j in 0..rhs.len {
                let t = out.words[i + j] as u128
                    + self.words[i] as u128 * rhs.words[j] as u128
                    + carry;
                out.words[i + j] = t as u64 & self.width.mask();
                carry = t >> w;
            }
            out.words[i + rhs.len] = carry as u64;
        }
        out
    }

    /// Truncating quotient and remainder. `rhs` must be non-zero.
    fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        let mut quot = Self::new(self.width).resized(self.len);
        let mut rem = Self::new(self.width);
        for i in (0..self.bit_len()).rev() {
            rem = rem.shl(1).resized(rhs.len + 1);
            if self.bit(i) {
                rem.words[0] |= 1;
            }
            if rem.compare(rhs).is_ge() {
                rem = rem.sub(rhs);
                quot.set_bit(i);
            }
        }
        (quot, rem)
    }

    fn shl(&self, n: u32) -> Self {
        let w = self.width.bits();
        let (limbs, bits) = ((n / w) as usize, n % w);
        let mut out = Self::new(self.width).resized(self.len + limbs + 1);
        for i in 0..self.len {
            let word = (self.words[i] as u128) << bits;
            out.words[i + limbs] |= word as u64 & self.width.mask();
            out.words[i + limbs + 1] |= (word >> w) as u64;
        }
        out
    }

    fn shr(&self, n: u32) -> Self {
        let w = self.width.bits();
        let (limbs, bits) = ((n / w) as usize, n % w);
        let mut out = Self::new(self.width).resized(self.len);
        for i in limbs..self.len {
            let word = (self.limb(i + 1) as u128) << w | self.words[i] as u128;
            out.words[i - limbs] = (word >> bits) as u64 & self.width.mask();
        }
        out
    }

    /// Two's complement over at least 64 bits.
    fn negated(&self) -> Self {
        let mut inverted = self.resized(self.len.max(self.width.operand_limbs()));
        for word in &mut inverted.words[..inverted.len] {
            *word = !*word & self.width.mask();
        }
        inverted.add(&Self::one(self.width))
    }

    /// The low `ty.bits()` bits, assembled into one word.
    fn to_bits(&self, ty: IntType) -> u64 {
        let w = self.width.bits();
        let count = ty.bits().div_ceil(w) as usize;
        let word = (0..count).fold(0u64, |acc, i| acc | self.limb(i) << (i as u32 * w));
        word & ty.width().mask()
    }
}

/// Sign-magnitude integer. Zero is never negative.
#[derive(Clone, Copy, Debug)]
struct Signed {
    negative: bool,
    mag: Limbs,
}

impl Signed {
    fn new(negative: bool, mag: Limbs) -> Self {
        Self {
            negative: negative && !mag.is_zero(),
            mag,
        }
    }

    fn load(width: NativeWidth, v: Value) -> Self {
        let bits = Limbs::from_u64(width, v.bits());
        if v.ty().is_signed() && v.sign_bit() {
            let mag = bits.negated().to_bits(v.ty());
            return Self::new(true, Limbs::from_u64(width, mag));
        }
        Self::new(false, bits)
    }

    fn max_of(width: NativeWidth, ty: IntType) -> Self {
        Self::new(false, Limbs::from_u64(width, ty.max() as u64))
    }

    fn min_of(width: NativeWidth, ty: IntType) -> Self {
        Self::new(true, Limbs::from_u64(width, ty.min().unsigned_abs() as u64))
    }

    /// Two's complement bits of the value, truncated to `ty`.
    fn store(&self, ty: IntType) -> Value {
        let bits = if self.negative {
            self.mag.negated().to_bits(ty)
        } else {
            self.mag.to_bits(ty)
        };
        Value::from_bits(ty, bits)
    }

    fn compare(&self, rhs: &Self) -> Ordering {
        match (self.negative, rhs.negative) {
            (false, false) => self.mag.compare(&rhs.mag),
            (true, true) => rhs.mag.compare(&self.mag),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }

    fn range_error(&self, ty: IntType) -> Option<ErrorKind> {
        let width = self.mag.width;
        if self.compare(&Self::max_of(width, ty)).is_gt() {
            Some(ErrorKind::Overflow)
        } else if self.compare(&Self::min_of(width, ty)).is_lt() {
            Some(ErrorKind::Underflow)
        } else {
            None
        }
    }

    fn add(&self, rhs: &Self) -> Self {
        if self.negative == rhs.negative {
            return Self::new(self.negative, self.mag.add(&rhs.mag));
        }
        match self.mag.compare(&rhs.mag) {
            Ordering::Less => Self::new(rhs.negative, rhs.mag.sub(&self.mag)),
            _ => Self::new(self.negative, self.mag.sub(&rhs.mag)),
        }
    }

    fn sub(&self, rhs: &Self) -> Self {
        self.add(&Self::new(!rhs.negative, rhs.mag))
    }

    fn mul(&self, rhs: &Self) -> Self {
        Self::new(self.negative != rhs.negative, self.mag.mul(&rhs.mag))
    }

    /// Quotient truncated toward zero; the remainder takes the dividend's sign.
    fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        let (quot, rem) = self.mag.div_rem(&rhs.mag);
        (
            Self::new(self.negative != rhs.negative, quot),
            Self::new(self.negative, rem),
        )
    }
}

/// Evaluates operations the way generated code does on a target of the
/// given word size.
#[derive(Clone, Copy, Debug)]
pub struct NativeMachine {
    width: NativeWidth,
}

impl NativeMachine {
    pub fn new(width: NativeWidth) -> Self {
        Self { width }
    }

    pub fn width(&self) -> NativeWidth {
        self.width
    }

    pub fn eval(&self, op: &Operation, ctx: &mut ErrorContext) -> Result<Output, Fault> {
        let rhs = op.rhs.unwrap_or_else(|| Value::zero(op.lhs.ty()));
        let out = match op.kind {
            OpKind::Binary(bin) => Output::Int(self.binary(bin, op.lhs, rhs, op.result_type, ctx)?),
            OpKind::Shift(shift) => Output::Int(self.shift(shift, op.lhs, rhs, ctx)?),
            OpKind::Convert(conv) => Output::Int(self.convert(conv, op.lhs, op.result_type, ctx)?),
            OpKind::Compare(cmp) => {
                let ord = self.load(op.lhs).compare(&self.load(rhs));
                Output::Bool(cmp.holds(ord))
            }
        };
        Ok(out)
    }

    fn load(&self, v: Value) -> Signed {
        Signed::load(self.width, v)
    }

    fn binary(
        &self,
        op: BinOp,
        lhs: Value,
        rhs: Value,
        ty: IntType,
        ctx: &mut ErrorContext,
    ) -> Result<Value, Fault> {
        let kind = OpKind::Binary(op);
        let (a, b) = (self.load(lhs), self.load(rhs));

        if matches!(op, BinOp::Div | BinOp::Rem) && b.mag.is_zero() {
            ctx.report(ErrorKind::DivideByZero, kind)?;
            return Ok(Value::zero(ty));
        }

        let exact = match op {
            BinOp::Add => a.add(&b),
            BinOp::Sub => a.sub(&b),
            BinOp::Mul => a.mul(&b),
            BinOp::Div => a.div_rem(&b).0,
            BinOp::Rem => a.div_rem(&b).1,
        };
        if let Some(err) = exact.range_error(ty) {
            ctx.report(err, kind)?;
        }
        Ok(exact.store(ty))
    }

    fn shift(
        &self,
        op: ShiftOp,
        lhs: Value,
        amount: Value,
        ctx: &mut ErrorContext,
    ) -> Result<Value, Fault> {
        let ty = lhs.ty();
        if ty.is_signed() {
            return Err(Misuse::SignedShift(ty).into());
        }

        let kind = OpKind::Shift(op);
        let n = self.load(amount);
        let limit = Limbs::from_u64(self.width, ty.bits() as u64);
        if n.negative || n.mag.compare(&limit).is_ge() {
            ctx.report(ErrorKind::ShiftOutOfRange, kind)?;
            return Ok(Value::zero(ty));
        }

        let n = n.mag.to_bits(IntType::U32) as u32;
        let x = self.load(lhs).mag;
        let shifted = match op {
            ShiftOp::Shr => x.shr(n),
            ShiftOp::Shl | ShiftOp::WrapShl => x.shl(n),
        };
        if op == ShiftOp::Shl && Signed::new(false, shifted).range_error(ty).is_some() {
            ctx.report(ErrorKind::Overflow, kind)?;
        }
        Ok(Value::from_bits(ty, shifted.to_bits(ty)))
    }

    fn convert(
        &self,
        conv: Conversion,
        v: Value,
        to: IntType,
        ctx: &mut ErrorContext,
    ) -> Result<Value, Fault> {
        let from = v.ty();
        let x = self.load(v);
        let out = match conv {
            Conversion::Widen => {
                if !to.can_represent(from) {
                    return Err(Misuse::NotWidening { from, to }.into());
                }
                x.store(to)
            }
            Conversion::Narrow => {
                if x.range_error(to).is_some() {
                    ctx.report(
                        ErrorKind::TruncationDataLoss,
                        OpKind::Convert(Conversion::Narrow),
                    )?;
                }
                x.store(to)
            }
            Conversion::Saturate => match x.range_error(to) {
                Some(ErrorKind::Overflow) => Signed::max_of(self.width, to).store(to),
                Some(_) => Signed::min_of(self.width, to).store(to),
                None => x.store(to),
            },
            Conversion::Wrap => {
                if to.is_signed() {
                    return Err(Misuse::SignedWrapTarget(to).into());
                }
                x.store(to)
            }
            Conversion::Reinterpret => {
                if from.bits() != to.bits() {
                    return Err(Misuse::WidthMismatch { from, to }.into());
                }
                let bits = Limbs::from_u64(self.width, v.bits());
                Value::from_bits(to, bits.to_bits(to))
            }
        };
        Ok(out)
    }
}
