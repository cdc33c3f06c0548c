/// Greedy bounded factorization of `a` into at most `d` factors from `[2, f]`.
///
/// Candidates are tried from `f` down to 2, each divided out as often as it
/// divides. An empty result means the greedy pass did not succeed; it does
/// not mean no factorization exists.
pub fn factorize(a: u64, f: u64, d: usize) -> Vec<u64> {
    let mut rest = a;
    let mut cand = f;
    let mut factors = Vec::new();
    while rest > 1 && cand > 1 {
        while rest % cand == 0 {
            factors.push(cand);
            rest /= cand;
        }
        cand -= 1;
    }

    if rest == 1 && factors.len() <= d {
        factors
    } else {
        Vec::new()
    }
}
