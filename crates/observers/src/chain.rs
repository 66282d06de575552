use hyperfit_core::Observer;

/// Runs two observers on every event.
///
/// Both observers see each event. The first one's action wins when both
/// request one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Chain<A, B>(pub A, pub B);

impl<E, Act, A, B> Observer<E, Act> for Chain<A, B>
where
    A: Observer<E, Act>,
    B: Observer<E, Act>,
{
    fn observe(&mut self, event: &E) -> Option<Act> {
        let first = self.0.observe(event);
        let second = self.1.observe(event);
        first.or(second)
    }
}
