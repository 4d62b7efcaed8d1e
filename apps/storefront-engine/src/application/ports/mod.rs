//! Application ports: interfaces to systems outside the core.

mod notifier_port;
mod payment_processor_port;

pub use notifier_port::{NoOpNotifier, NotifierPort, NotifyError};
pub use payment_processor_port::{
    ChargeRequest, PaymentProcessorPort, ProcessorError, ProcessorReceipt, charge_with_deadline,
};

#[cfg(test)]
pub use payment_processor_port::MockPaymentProcessorPort;
