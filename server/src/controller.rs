use std::future::IntoFuture;
use std::marker::PhantomData;

// Based on https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs

/// Turns a request into the dto a service takes.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Turns a service result into a response.
pub trait Exhaust<O>: 'static + Sync + Send {
    type To;
    fn emit(&self, output: O) -> Self::To;
}

pub struct Controller<T, P, I, D, O> {
    transformer: T,
    presenter: P,
    _marker: PhantomData<fn(I) -> (D, O)>,
}

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: Intake<I, To = D>,
    P: Exhaust<O>,
{
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
            _marker: PhantomData,
        }
    }

    pub fn intake(self, input: I) -> Transformed<P, D, O> {
        Transformed {
            dto: self.transformer.emit(input),
            presenter: self.presenter,
            _marker: PhantomData,
        }
    }
}

pub struct Transformed<P, D, O> {
    dto: D,
    presenter: P,
    _marker: PhantomData<fn() -> O>,
}

impl<P, D, O> Transformed<P, D, O>
where
    P: Exhaust<O>,
{
    pub async fn handle<F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        let output = f(self.dto).await?;
        Ok(self.presenter.emit(output))
    }
}
