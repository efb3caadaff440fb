//! Shared application state.

use std::sync::Arc;

use crate::application::{
    AssignAgentHandler, CancelBookingHandler, CreateBookingHandler, FindBookingByPhoneHandler,
    GetAgentLocationHandler, GetBookingByTaskHandler, GetFleetHandler, ListBookingsHandler,
    ListInquiriesHandler, SubmitInquiryHandler, UpdateBookingStatusHandler,
};
use crate::ports::{BookingRepository, DispatchCrm, InquiryRepository};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub crm: Arc<dyn DispatchCrm>,
    pub bookings: Arc<dyn BookingRepository>,
    pub inquiries: Arc<dyn InquiryRepository>,
}

impl AppState {
    pub fn new(
        crm: Arc<dyn DispatchCrm>,
        bookings: Arc<dyn BookingRepository>,
        inquiries: Arc<dyn InquiryRepository>,
    ) -> Self {
        Self {
            crm,
            bookings,
            inquiries,
        }
    }

    // Handlers are created on demand from the shared state.

    pub fn create_booking_handler(&self) -> CreateBookingHandler {
        CreateBookingHandler::new(self.crm.clone(), self.bookings.clone())
    }

    pub fn list_bookings_handler(&self) -> ListBookingsHandler {
        ListBookingsHandler::new(self.crm.clone(), self.bookings.clone())
    }

    pub fn find_booking_by_phone_handler(&self) -> FindBookingByPhoneHandler {
        FindBookingByPhoneHandler::new(self.crm.clone(), self.bookings.clone())
    }

    pub fn get_booking_by_task_handler(&self) -> GetBookingByTaskHandler {
        GetBookingByTaskHandler::new(self.crm.clone())
    }

    pub fn update_booking_status_handler(&self) -> UpdateBookingStatusHandler {
        UpdateBookingStatusHandler::new(self.crm.clone(), self.bookings.clone())
    }

    pub fn assign_agent_handler(&self) -> AssignAgentHandler {
        AssignAgentHandler::new(self.crm.clone())
    }

    pub fn cancel_booking_handler(&self) -> CancelBookingHandler {
        CancelBookingHandler::new(self.crm.clone())
    }

    pub fn submit_inquiry_handler(&self) -> SubmitInquiryHandler {
        SubmitInquiryHandler::new(self.crm.clone(), self.inquiries.clone())
    }

    pub fn list_inquiries_handler(&self) -> ListInquiriesHandler {
        ListInquiriesHandler::new(self.inquiries.clone())
    }

    pub fn agent_location_handler(&self) -> GetAgentLocationHandler {
        GetAgentLocationHandler::new(self.crm.clone())
    }

    pub fn fleet_handler(&self) -> GetFleetHandler {
        GetFleetHandler::new(self.crm.clone())
    }
}
