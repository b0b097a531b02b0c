/// Spins until `busy` returns `false`, returning how many times it was evaluated.
///
/// There is no timeout: a condition that never clears blocks forever. The
/// returned count saturates rather than wrapping.
pub fn spin_while<F>(mut busy: F) -> u32
where
    F: FnMut() -> bool,
{
    let mut polls: u32 = 0;
    loop {
        polls = polls.saturating_add(1);
        if !busy() {
            return polls;
        }
        core::hint::spin_loop();
    }
}
