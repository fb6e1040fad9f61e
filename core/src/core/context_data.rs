// fern/src/core/context_data.rs
use crate::core::context::Context;
use crate::response::ResponseFinalizer;
use parking_lot::{
  MappedRwLockReadGuard,
  MappedRwLockWriteGuard,
  RwLock,
  RwLockReadGuard,
  RwLockWriteGuard,
};
use std::sync::Arc;

/// Handle to a request's [`Context`], handed to every step.
///
/// Only the executor running that request holds clones of it, so the lock is never
/// contended across requests. Guards are blocking and MUST NOT be held across
/// `.await` points inside deferred steps.
#[derive(Debug)]
pub struct ContextData(Arc<RwLock<Context>>);

impl ContextData {
  pub fn new(ctx: Context) -> Self {
    ContextData(Arc::new(RwLock::new(ctx)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, Context> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, Context> {
    self.0.write()
  }

  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, Context>> {
    self.0.try_read()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, Context>> {
    self.0.try_write()
  }

  // Example: ctx.map_read(|c| &c.db)
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&Context) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  pub fn map_write<F, U: ?Sized>(&self, f: F) -> MappedRwLockWriteGuard<'_, U>
  where
    F: FnOnce(&mut Context) -> &mut U,
  {
    RwLockWriteGuard::map(self.write(), f)
  }

  /// A clone of the request's finalizer, usable without holding the context lock.
  pub fn response(&self) -> ResponseFinalizer {
    self.read().response.clone()
  }
}

impl Clone for ContextData {
  fn clone(&self) -> Self {
    ContextData(Arc::clone(&self.0))
  }
}
