use std::{
    cell::{Cell, RefCell},
    fmt::{Debug, Formatter},
    rc::Rc,
};

type Listener<T> = Box<dyn Fn(T)>;

struct Inner<T> {
    value: Cell<T>,
    listeners: RefCell<Vec<Listener<T>>>,
}

/// A shared, observable value.
///
/// Clones are handles to the same cell. Every change is pushed to the
/// subscribers before `set` returns, so anything bound to a property reads
/// the new value as soon as the write that caused it is done.
pub struct Property<T>(Rc<Inner<T>>);

impl<T> Debug for Property<T>
where
    T: Copy + Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.0.value.get())
            .field("listeners", &self.0.listeners.borrow().len())
            .finish()
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Property<T>
where
    T: Copy + Default + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Property<T>
where
    T: Copy + PartialEq + 'static,
{
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: Cell::new(value),
            listeners: RefCell::default(),
        }))
    }

    pub fn get(&self) -> T {
        self.0.value.get()
    }

    /// Writes `value` and notifies the subscribers if it differs from the current one.
    pub fn set(&self, value: T) {
        if self.0.value.replace(value) == value {
            return;
        }

        for listener in self.0.listeners.borrow().iter() {
            listener(value);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(T) + 'static) {
        self.0.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Makes `self` follow `source`. Writes to `self` don't flow back.
    pub fn bind(&self, source: &Self) {
        self.bind_map(source, |value| value);
    }

    /// Makes `self` follow `f(source)`. Writes to `self` don't flow back.
    pub fn bind_map<S>(&self, source: &Property<S>, f: impl Fn(S) -> T + 'static)
    where
        S: Copy + PartialEq + 'static,
    {
        self.set(f(source.get()));

        let target = self.clone();
        source.subscribe(move |value| target.set(f(value)));
    }
}
