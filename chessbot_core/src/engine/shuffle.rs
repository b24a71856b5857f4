use rand::Rng;

/// Returns the moves in a uniformly random order.
///
/// Each step draws one of the remaining moves uniformly and appends it to
/// the output, so equally scored moves are not always resolved in favour of
/// the one the generator happened to list first.
pub fn shuffle_moves<M, R>(moves: Vec<M>, rng: &mut R) -> Vec<M>
where
    R: Rng + ?Sized,
{
    let mut remaining = moves;
    let mut shuffled = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let pick = rng.gen_range(0..remaining.len());
        shuffled.push(remaining.swap_remove(pick));
    }
    shuffled
}

pub fn shuffle<M: Clone>(moves: &[M]) -> Vec<M> {
    shuffle_moves(moves.to_vec(), &mut rand::thread_rng())
}
