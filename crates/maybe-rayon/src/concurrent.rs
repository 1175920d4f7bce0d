pub mod prelude {
    pub use rayon::iter::ParallelIterator;
    use rayon::prelude::*;

    pub trait MaybeIntoParallelRefIterator<'data>: IntoParallelRefIterator<'data> {
        fn maybe_par_iter(&'data self) -> Self::Iter;
    }

    impl<'data, I: IntoParallelRefIterator<'data> + ?Sized> MaybeIntoParallelRefIterator<'data>
        for I
    {
        fn maybe_par_iter(&'data self) -> Self::Iter {
            self.par_iter()
        }
    }
}

pub fn current_num_threads() -> usize {
    rayon::current_num_threads()
}
