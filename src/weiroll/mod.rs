//! Minimal weiroll planner.
//!
//! Recipes are sequences of contract calls whose arguments are either literal
//! words or the return value of an earlier call. The planner lowers them to
//! the `(commands, state)` pair executed by a weiroll wallet.
//!
//! Command layout (one `bytes32` per call):
//!
//! ```text
//! | selector (4) | flags (1) | inputs (6) | output (1) | target (20) |
//! ```
//!
//! Calls with more than six inputs set the extended flag and store their input
//! indices in the following `bytes32`.

mod command;

use std::collections::HashMap;

use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::error::{Error, Result};
use crate::onchain::abi::Recipe;

pub use command::{CallType, Command, FLAG_EXTENDED, UNUSED_SLOT};

/// Highest usable state index (the top bit of a slot byte is a type flag).
pub const MAX_STATE_SLOTS: usize = 0x7f;

/// An argument to a planned call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// A static ABI word stored in the script state.
    Literal(B256),
    /// The return value written to the given state slot by an earlier call.
    Return(u8),
}

impl From<Address> for Value {
    fn from(addr: Address) -> Self {
        Value::Literal(addr.into_word())
    }
}

impl From<U256> for Value {
    fn from(v: U256) -> Self {
        Value::Literal(B256::from(v.to_be_bytes::<32>()))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::from(U256::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::from(U256::from(v as u8))
    }
}

/// One contract call to add to a script.
#[derive(Debug, Clone)]
pub struct Call {
    pub target: Address,
    pub selector: [u8; 4],
    pub call_type: CallType,
    pub args: Vec<Value>,
}

impl Call {
    /// A state-changing `CALL` to `target` for the Solidity function `C`.
    pub fn call<C: SolCall>(target: Address, args: Vec<Value>) -> Self {
        Call {
            target,
            selector: C::SELECTOR,
            call_type: CallType::Call,
            args,
        }
    }

    /// A `STATICCALL` to `target` for the Solidity function `C`.
    pub fn static_call<C: SolCall>(target: Address, args: Vec<Value>) -> Self {
        Call {
            call_type: CallType::StaticCall,
            ..Self::call::<C>(target, args)
        }
    }
}

/// Compiled script: the recipe stored on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub commands: Vec<B256>,
    pub state: Vec<Bytes>,
}

impl From<Script> for Recipe {
    fn from(script: Script) -> Self {
        Recipe {
            commands: script.commands,
            state: script.state,
        }
    }
}

impl From<Recipe> for Script {
    fn from(recipe: Recipe) -> Self {
        Script {
            commands: recipe.commands,
            state: recipe.state,
        }
    }
}

impl Script {
    pub fn to_recipe(&self) -> Recipe {
        self.clone().into()
    }
}

#[derive(Debug, Default)]
pub struct Planner {
    commands: Vec<B256>,
    state: Vec<Bytes>,
    literals: HashMap<B256, u8>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a call whose return value is kept for later calls.
    pub fn add(&mut self, call: Call) -> Result<Value> {
        let out = self.alloc_slot(Bytes::new())?;
        self.push(call, out)?;
        Ok(Value::Return(out))
    }

    /// Add a call whose return value is discarded.
    pub fn add_void(&mut self, call: Call) -> Result<()> {
        self.push(call, UNUSED_SLOT)
    }

    pub fn compile(self) -> Script {
        Script {
            commands: self.commands,
            state: self.state,
        }
    }

    fn push(&mut self, call: Call, output: u8) -> Result<()> {
        let inputs = call
            .args
            .iter()
            .map(|arg| self.slot_for(*arg))
            .collect::<Result<Vec<u8>>>()?;

        let command = Command {
            selector: call.selector,
            call_type: call.call_type,
            inputs,
            output,
            target: call.target,
        };
        self.commands.extend(command.encode()?);
        Ok(())
    }

    fn slot_for(&mut self, value: Value) -> Result<u8> {
        match value {
            Value::Return(slot) => Ok(slot),
            Value::Literal(word) => {
                if let Some(&slot) = self.literals.get(&word) {
                    return Ok(slot);
                }
                let slot = self.alloc_slot(Bytes::copy_from_slice(word.as_slice()))?;
                self.literals.insert(word, slot);
                Ok(slot)
            }
        }
    }

    fn alloc_slot(&mut self, initial: Bytes) -> Result<u8> {
        if self.state.len() >= MAX_STATE_SLOTS {
            return Err(Error::ScriptTooLarge(MAX_STATE_SLOTS));
        }
        self.state.push(initial);
        Ok((self.state.len() - 1) as u8)
    }
}
