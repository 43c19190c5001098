use tracing_subscriber::EnvFilter;
use x86sim_core::common::SimResult;
use x86sim_core::config::{Config, StackPolicyKind};
use x86sim_core::core::Cpu;
use x86sim_core::core::arch::mode::Mode;
use x86sim_core::isa::handler::{Dispatch, HandlerResult};
use x86sim_core::Simulator;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Callback that consumes a one-byte instruction.
pub fn accept_one(cpu: &mut Cpu) -> HandlerResult {
    cpu.advance_instruction_pointer(1);
    Ok(Dispatch::Accepted)
}

/// Callback that always declines.
pub fn decline(_: &mut Cpu) -> HandlerResult {
    Ok(Dispatch::Declined)
}

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Long mode, strict stack, reference instructions installed.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self::with_config(&Config {
            mode,
            ..Config::default()
        })
    }

    pub fn with_stack_policy(policy: StackPolicyKind) -> Self {
        let mut config = Config::default();
        config.stack.policy = policy;
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        Self {
            sim: Simulator::with_default_instructions(config, Vec::new()),
        }
    }

    /// Simulator without any handlers.
    pub fn bare(config: &Config) -> Self {
        init_tracing();
        Self {
            sim: Simulator::new(config),
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    pub fn load(&mut self, code: &[u8]) -> &mut Self {
        self.sim.set_code_buffer(code.to_vec());
        self
    }

    pub fn run(&mut self) -> SimResult<u64> {
        self.sim.simulate()
    }

    /// Loads `code` and runs it to completion, panicking on error.
    pub fn execute(&mut self, code: &[u8]) -> u64 {
        self.load(code);
        match self.run() {
            Ok(steps) => steps,
            Err(err) => panic!("simulation of {code:02x?} failed: {err}"),
        }
    }
}
