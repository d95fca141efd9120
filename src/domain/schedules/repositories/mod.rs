pub(crate) mod schedules;
pub(crate) mod time_slots;

pub(crate) use schedules::PgSchedulesRepository;
pub(crate) use time_slots::PgTimeSlotsRepository;
