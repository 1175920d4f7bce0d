pub mod prelude {
    pub trait MaybeIntoParallelRefIterator<'data> {
        type Iter: Iterator;

        fn maybe_par_iter(&'data self) -> Self::Iter;
    }

    impl<'data, I: 'data + ?Sized> MaybeIntoParallelRefIterator<'data> for I
    where
        &'data I: IntoIterator,
    {
        type Iter = <&'data I as IntoIterator>::IntoIter;

        fn maybe_par_iter(&'data self) -> Self::Iter {
            self.into_iter()
        }
    }
}

pub fn current_num_threads() -> usize {
    1
}
