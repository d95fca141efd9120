//! Test Helpers

use jiff::civil::{Date, Time, time};

use crate::domain::{
    schedules::models::{NewSchedule, NewTimeSlot},
    templates::models::{NewTemplate, NewTemplateItem},
};

/// (hour, minute) shorthand used all over the service tests.
pub(crate) type Hm = (i8, i8);

fn at((hour, minute): Hm) -> Time {
    time(hour, minute, 0, 0)
}

pub(crate) fn time_slot(start: Hm, end: Hm) -> NewTimeSlot {
    NewTimeSlot {
        start_time: at(start),
        end_time: at(end),
    }
}

pub(crate) fn new_schedule(work_date: Date, slots: &[(Hm, Hm)]) -> NewSchedule {
    NewSchedule {
        work_date,
        note: None,
        time_slots: slots.iter().map(|&(start, end)| time_slot(start, end)).collect(),
    }
}

pub(crate) fn template_item(start: Hm, end: Hm) -> NewTemplateItem {
    NewTemplateItem {
        start_time: at(start),
        end_time: at(end),
    }
}

pub(crate) fn new_template(name: &str, items: &[(Hm, Hm)]) -> NewTemplate {
    NewTemplate {
        name: name.to_string(),
        note: None,
        items: items.iter().map(|&(start, end)| template_item(start, end)).collect(),
    }
}
