// Session collaborators: the conference handle, the external event sink and
// the notification system.
//
// The take-shot coordinator only talks to these through the traits in
// `traits`, so a real client, the CLI simulation and the tests can each plug
// in their own. `memory` holds recording implementations for the latter two.

pub mod memory;
pub mod traits;
