mod pump;
