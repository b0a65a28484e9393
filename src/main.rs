fn main() {
    formula::term::main()
}
