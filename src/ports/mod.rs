//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## External Service Ports
//!
//! - `DispatchCrm` - The dispatch CRM that owns task and agent state
//!
//! ## Storage Ports
//!
//! - `BookingRepository` - Local booking rows
//! - `InquiryRepository` - Local membership inquiries

mod booking_repository;
mod dispatch_crm;
mod inquiry_repository;

pub use booking_repository::BookingRepository;
pub use dispatch_crm::{
    AgentLookup, CreateTaskRequest, CreatedTask, CrmError, DispatchCrm, InquiryType,
    InquiryVehicle, MembershipInquiryRequest, TaskEdit, TaskListQuery, TaskLookup,
    TaskPriority, DEFAULT_TASK_PAGE_LIMIT,
};
pub use inquiry_repository::InquiryRepository;
