mod auto_register;
mod trait_typed;

pub(crate) use auto_register::get_auto_register_impl;
pub(crate) use trait_typed::impl_trait_typed;
