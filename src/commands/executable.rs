use std::ops::{Deref, DerefMut};

use crate::frame::Frame;
use crate::session::ClientInfo;
use crate::store::Keyspace;
use crate::Error;

pub trait Executable {
    fn exec(self, ctx: &mut Context) -> Result<Frame, Error>;
}

/// What a command runs against: the locked keyspace plus the metadata of the client that sent it.
/// Dereferences to the keyspace, which is all most commands need.
pub struct Context<'a> {
    store: &'a mut Keyspace,
    pub client: &'a mut ClientInfo,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a mut Keyspace, client: &'a mut ClientInfo) -> Context<'a> {
        Context { store, client }
    }
}

impl Deref for Context<'_> {
    type Target = Keyspace;

    fn deref(&self) -> &Self::Target {
        self.store
    }
}

impl DerefMut for Context<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.store
    }
}
