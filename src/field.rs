use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// An element of the sharing field, reduced below its modulus
///
/// # Example
/// ```
/// use mnemonic_share::FieldElement;
///
/// let element = FieldElement::from(0xABu32);
/// assert_eq!(element.value().to_bytes_be(), vec![0xAB]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    #[inline]
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    #[inline]
    pub fn into_value(self) -> BigUint {
        self.0
    }
}

impl From<u32> for FieldElement {
    fn from(value: u32) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for FieldElement {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

/// Integers modulo `p`
///
/// Arithmetic is only a field when `p` is prime. For a composite modulus
/// [`PrimeField::inverse`] returns `None` for every non-unit.
///
/// # Example
/// ```
/// use mnemonic_share::{FieldElement, PrimeField};
/// use num_bigint::BigUint;
///
/// let field = PrimeField::new(BigUint::from(257u32));
/// let a = FieldElement::from(200u32);
/// let b = FieldElement::from(100u32);
/// assert_eq!(field.add(&a, &b), FieldElement::from(43u32));
/// assert_eq!(field.sub(&b, &a), FieldElement::from(157u32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    pub fn new(modulus: BigUint) -> Self {
        Self { modulus }
    }

    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// True when `element` is already reduced below the modulus
    #[inline]
    pub fn contains(&self, element: &FieldElement) -> bool {
        element.0 < self.modulus
    }

    #[inline]
    pub fn reduce(&self, value: &BigUint) -> FieldElement {
        FieldElement(value % &self.modulus)
    }

    #[inline]
    pub fn add(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement((&a.0 + &b.0) % &self.modulus)
    }

    #[inline]
    pub fn sub(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        // operands are reduced, so adding the modulus keeps the result non-negative
        FieldElement((&a.0 + &self.modulus - &b.0) % &self.modulus)
    }

    #[inline]
    pub fn mul(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement((&a.0 * &b.0) % &self.modulus)
    }

    /// Multiplicative inverse via the extended Euclidean algorithm
    ///
    /// Returns `None` for zero and for any value sharing a factor with the
    /// modulus.
    ///
    /// # Example
    /// ```
    /// use mnemonic_share::{FieldElement, PrimeField};
    /// use num_bigint::BigUint;
    ///
    /// let field = PrimeField::new(BigUint::from(257u32));
    /// let a = FieldElement::from(3u32);
    /// let inv = field.inverse(&a).unwrap();
    /// assert_eq!(field.mul(&a, &inv), FieldElement::from(1u32));
    /// ```
    pub fn inverse(&self, a: &FieldElement) -> Option<FieldElement> {
        let modulus = BigInt::from_biguint(Sign::Plus, self.modulus.clone());
        let mut r0 = modulus.clone();
        let mut r1 = BigInt::from_biguint(Sign::Plus, &a.0 % &self.modulus);
        let mut t0 = BigInt::zero();
        let mut t1 = BigInt::one();

        while !r1.is_zero() {
            let q = &r0 / &r1;
            let r2 = &r0 - &q * &r1;
            let t2 = &t0 - &q * &t1;
            r0 = std::mem::replace(&mut r1, r2);
            t0 = std::mem::replace(&mut t1, t2);
        }

        if !r0.is_one() {
            return None;
        }
        if t0.sign() == Sign::Minus {
            t0 += &modulus;
        }
        t0.to_biguint().map(FieldElement)
    }

    /// Evaluates `coefficients[0] + coefficients[1]·x + …` at `x` with Horner's rule
    pub fn evaluate(&self, coefficients: &[FieldElement], x: &FieldElement) -> FieldElement {
        coefficients
            .iter()
            .rev()
            .fold(FieldElement::zero(), |acc, coeff| {
                self.add(&self.mul(&acc, x), coeff)
            })
    }
}
