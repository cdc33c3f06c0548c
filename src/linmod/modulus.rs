pub const MIN_MODULUS: u64 = 5;

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

pub fn next_prime_at_least(n: u64) -> Option<u64> {
    let mut c = n.max(2);
    loop {
        if is_prime(c) {
            return Some(c);
        }
        c = c.checked_add(1)?;
    }
}

pub fn choose_modulus(l: u64) -> Option<u64> {
    next_prime_at_least(l.max(MIN_MODULUS))
}
